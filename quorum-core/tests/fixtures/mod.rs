pub mod constants;
pub mod factories;
pub mod ledger;

#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use factories::*;
#[allow(unused_imports)]
pub use ledger::*;
