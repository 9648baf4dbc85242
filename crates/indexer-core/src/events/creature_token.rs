use alloy_sol_types::sol;

sol! {
    /// ERC-20 transfer; mints come from and burns go to the zero address
    #[derive(Debug)]
    event Transfer(
        address indexed from,
        address indexed to,
        uint256 value
    );

    /// Bonding-curve trade, emitted after the Transfer of the same tx
    #[derive(Debug)]
    event Trade(
        address indexed trader,
        bool isBuy,
        uint256 amount,
        uint256 ethAmount,
        uint256 protocolFee
    );

    #[derive(Debug)]
    event BattleStarted(
        address indexed opponent
    );

    #[derive(Debug)]
    event BattleEnded(
        address indexed winner,
        address indexed loser,
        uint256 transferredValue
    );

    #[derive(Debug)]
    event OwnershipTransferred(
        address indexed previousOwner,
        address indexed newOwner
    );

    #[derive(Debug)]
    event Paused(
        address account
    );

    #[derive(Debug)]
    event Unpaused(
        address account
    );

    #[derive(Debug)]
    event Approval(
        address indexed owner,
        address indexed spender,
        uint256 value
    );

    #[derive(Debug)]
    event TokensMigrated(
        address indexed account,
        uint256 amount
    );

    /// Sits between the Transfer and the Trade of a whitelist buy
    #[derive(Debug)]
    event WhitelistPurchase(
        address indexed buyer,
        uint256 amount
    );
}
