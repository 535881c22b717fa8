use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use solana_account_decoder::parse_token::token_amount_to_ui_amount;
use solana_sdk::pubkey::Pubkey;

use token_helpers::{config::Config, FindOrCreateOptions, Provider, RpcProvider};

/// Top-level struct for parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(author, version, about = "Token fixtures for local test ledgers", long_about = None)]
pub struct Args {
    /// Global configuration file path. This option allows you to specify
    /// a TOML file that contains configuration details.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub subcommand: Subcommands,
}

/// Each variant maps onto one library helper; owners and authorities default
/// to the configured payer.
#[derive(Debug, Subcommand)]
pub enum Subcommands {
    /// Create a new mint.
    CreateMint {
        /// Number of decimals of the new mint.
        #[arg(short, long, default_value_t = 0)]
        decimals: u8,
        /// Mint authority.
        #[arg(short, long)]
        authority: Option<Pubkey>,
    },

    /// Create a token account for the specified mint.
    CreateTokenAccount {
        /// The public key of the mint for which to create an account.
        mint: Pubkey,
        /// Owner of the new account.
        #[arg(short, long)]
        owner: Option<Pubkey>,
    },

    /// Mint tokens to an existing token account. The payer must be the mint authority.
    MintTo {
        /// The public key of the mint.
        mint: Pubkey,
        /// The target token account's public key.
        token_account: Pubkey,
        /// The amount of tokens to mint, in raw units.
        amount: u64,
    },

    /// Print the associated token account address for a wallet and mint.
    FindAta {
        mint: Pubkey,
        #[arg(short, long)]
        owner: Option<Pubkey>,
    },

    /// Create the associated token account unless it already exists.
    CreateAta {
        mint: Pubkey,
        #[arg(short, long)]
        owner: Option<Pubkey>,
        /// Send the creation transaction without checking for an existing account.
        #[arg(long)]
        skip_lookup: bool,
    },

    /// Show a token account's mint, owner and balance.
    TokenAccount { address: Pubkey },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::from_file(&args.config)?;
    let provider = RpcProvider::from_config(&config)?;
    info!("using {} as payer", provider.wallet());

    process_subcommand(args.subcommand, &provider).await
}

async fn process_subcommand(subcommand: Subcommands, provider: &RpcProvider) -> Result<()> {
    match subcommand {
        Subcommands::CreateMint {
            decimals,
            authority,
        } => {
            let mint = token_helpers::create_mint(provider, authority, decimals).await?;
            println!("Mint: {}", mint);
        }
        Subcommands::CreateTokenAccount { mint, owner } => {
            let owner = owner.unwrap_or_else(|| provider.wallet());
            let token_account = token_helpers::create_token_account(provider, &mint, &owner).await?;
            println!("Token Account: {}", token_account);
        }
        Subcommands::MintTo {
            mint,
            token_account,
            amount,
        } => {
            token_helpers::mint_to_account(
                provider,
                &mint,
                &token_account,
                amount,
                &provider.wallet(),
            )
            .await?;
            println!("Minted {} tokens to account: {}", amount, token_account);
        }
        Subcommands::FindAta { mint, owner } => {
            let owner = owner.unwrap_or_else(|| provider.wallet());
            let address =
                token_helpers::find_associated_token_address(provider.programs(), &owner, &mint);
            println!("{}", address);
        }
        Subcommands::CreateAta {
            mint,
            owner,
            skip_lookup,
        } => {
            let owner = owner.unwrap_or_else(|| provider.wallet());
            let options = FindOrCreateOptions {
                send_transaction: true,
                skip_lookup,
            };
            let (address, ix) = token_helpers::find_or_create_associated_token_account(
                provider, &owner, &mint, options,
            )
            .await?;
            match ix {
                Some(_) => println!("Created associated token account: {}", address),
                None => println!("Associated token account already exists: {}", address),
            }
        }
        Subcommands::TokenAccount { address } => {
            let account = token_helpers::get_token_account(provider, &address).await?;
            let mint = token_helpers::get_mint(provider, &account.mint).await?;
            let amount = token_amount_to_ui_amount(account.amount, mint.decimals);
            println!("Mint: {}", account.mint);
            println!("Owner: {}", account.owner);
            println!("Amount: {} ({} raw)", amount.ui_amount_string, amount.amount);
        }
    }
    Ok(())
}
