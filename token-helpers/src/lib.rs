pub mod associated;
pub mod config;
pub mod create_mint;
pub mod create_token_account;
pub mod mint_to;
pub mod provider;
pub mod rpc;
pub mod utils;

#[cfg(test)]
pub(crate) mod mock;

pub use associated::*;
pub use create_mint::*;
pub use create_token_account::*;
pub use mint_to::*;
pub use provider::{ProgramIds, Provider, RpcProvider};
pub use utils::*;
