use alloy_primitives::Address;
use dashmap::DashMap;
use indexer_core::types::{
    address_id, BattleOutcome, CurrentHoldings, EventRecord, GlobalStats, HoldingsSnapshot,
    MarketCapSnapshot, Monster, TotalVolumeTradedSnapshot, Trade, Trader,
};
use indexer_core::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Fields that can be used with [`EntityStore::query_where`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Monster,
    Trader,
}

/// Access to the entity collections. Mirrors the get / set / query
/// interface every reducer is written against.
pub trait EntityStore {
    fn get<E: Entity>(&self, id: &str) -> Result<Option<E>>;

    /// Replace-on-write; the whole row is stored
    fn set<E: Entity>(&mut self, entity: E) -> Result<()>;

    /// Rows whose `field` equals `value`, ordered by id
    fn query_where<E: Entity>(&self, field: Field, value: &str) -> Result<Vec<E>>;
}

/// Queryable field values of an entity
pub trait Fields {
    fn field(&self, field: Field) -> Option<String>;
}

/// A row type stored in one of the collections
pub trait Entity: Fields + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    fn table(tables: &Tables) -> &DashMap<String, Self>;

    fn staged(changes: &Changeset) -> &BTreeMap<String, Self>;

    fn staged_mut(changes: &mut Changeset) -> &mut BTreeMap<String, Self>;
}

macro_rules! entity_tables {
    ($( $table:ident : $ty:ty => $kind:ident ),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum EntityKind {
            $( $kind, )*
        }

        /// Committed rows, one map per collection
        #[derive(Debug, Default)]
        pub struct Tables {
            $( $table: DashMap<String, $ty>, )*
        }

        /// Writes staged by one reducer invocation
        #[derive(Debug, Default)]
        pub struct Changeset {
            $( $table: BTreeMap<String, $ty>, )*
            registrations: BTreeMap<Address, u64>,
        }

        /// Ordered copy of every collection
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct StoreSnapshot {
            $( pub $table: BTreeMap<String, $ty>, )*
        }

        impl Tables {
            pub(crate) fn snapshot(&self) -> StoreSnapshot {
                StoreSnapshot {
                    $(
                        $table: self
                            .$table
                            .iter()
                            .map(|e| (e.key().clone(), e.value().clone()))
                            .collect(),
                    )*
                }
            }

            pub(crate) fn count(&self, kind: EntityKind) -> usize {
                match kind {
                    $( EntityKind::$kind => self.$table.len(), )*
                }
            }
        }

        impl Changeset {
            /// Number of staged rows
            pub fn len(&self) -> usize {
                0 $( + self.$table.len() )*
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0 && self.registrations.is_empty()
            }

            pub(crate) fn stage_registration(&mut self, address: Address, block: u64) {
                self.registrations.entry(address).or_insert(block);
            }

            pub(crate) fn is_registration_staged(&self, address: &Address) -> bool {
                self.registrations.contains_key(address)
            }

            /// Moves every staged row into `tables`; returns the staged
            /// contract registrations
            pub(crate) fn apply_to(self, tables: &Tables) -> BTreeMap<Address, u64> {
                $(
                    for (id, row) in self.$table {
                        tables.$table.insert(id, row);
                    }
                )*
                self.registrations
            }
        }

        $(
            impl Entity for $ty {
                const KIND: EntityKind = EntityKind::$kind;

                fn id(&self) -> &str {
                    &self.id
                }

                fn table(tables: &Tables) -> &DashMap<String, Self> {
                    &tables.$table
                }

                fn staged(changes: &Changeset) -> &BTreeMap<String, Self> {
                    &changes.$table
                }

                fn staged_mut(changes: &mut Changeset) -> &mut BTreeMap<String, Self> {
                    &mut changes.$table
                }
            }
        )*
    };
}

entity_tables! {
    monsters: Monster => Monster,
    traders: Trader => Trader,
    holdings: CurrentHoldings => CurrentHoldings,
    trades: Trade => Trade,
    market_cap_snapshots: MarketCapSnapshot => MarketCapSnapshot,
    volume_snapshots: TotalVolumeTradedSnapshot => TotalVolumeTradedSnapshot,
    holdings_snapshots: HoldingsSnapshot => HoldingsSnapshot,
    global_stats: GlobalStats => GlobalStats,
    battle_outcomes: BattleOutcome => BattleOutcome,
    event_records: EventRecord => EventRecord,
}

impl Fields for Monster {
    fn field(&self, _field: Field) -> Option<String> {
        None
    }
}

impl Fields for Trader {
    fn field(&self, _field: Field) -> Option<String> {
        None
    }
}

impl Fields for GlobalStats {
    fn field(&self, _field: Field) -> Option<String> {
        None
    }
}

impl Fields for EventRecord {
    fn field(&self, _field: Field) -> Option<String> {
        None
    }
}

impl Fields for CurrentHoldings {
    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Monster => Some(self.monster.clone()),
            Field::Trader => Some(address_id(&self.trader)),
        }
    }
}

impl Fields for Trade {
    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Monster => Some(self.monster.clone()),
            Field::Trader => Some(address_id(&self.trader)),
        }
    }
}

impl Fields for HoldingsSnapshot {
    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Monster => Some(self.monster.clone()),
            Field::Trader => Some(address_id(&self.trader)),
        }
    }
}

impl Fields for MarketCapSnapshot {
    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Monster => Some(self.monster.clone()),
            Field::Trader => None,
        }
    }
}

impl Fields for TotalVolumeTradedSnapshot {
    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Monster => Some(self.monster.clone()),
            Field::Trader => None,
        }
    }
}

impl Fields for BattleOutcome {
    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Monster => Some(self.monster.clone()),
            Field::Trader => None,
        }
    }
}
