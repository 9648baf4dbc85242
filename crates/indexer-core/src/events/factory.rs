use alloy_sol_types::sol;

sol! {
    /// Emitted when the factory deploys a new creature token
    #[derive(Debug)]
    event TokenCreated(
        address indexed tokenAddress,
        address indexed creator
    );

    /// Emitted once the token's metadata has been set
    #[derive(Debug)]
    event TokenInitialized(
        address indexed tokenAddress,
        string name,
        string symbol
    );
}
