//! Card records and the entity store.
//!
//! - `CardId`: definition identifier
//! - `CardType` / `CardZone` / `CardRace`: closed classification tags
//! - `Card`: runtime record (zone, owner, position, stats, enchantments)
//! - `CardManager`: owns every record, addressed by `CardRef`

mod card;
mod definition;
mod manager;

pub use card::{Card, Enchantment, EnchantmentId};
pub use definition::{CardId, CardRace, CardType, CardZone};
pub use manager::CardManager;
