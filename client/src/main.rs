//! One-shot entry script: resolves the deployed lottery, reads the
//! entrance fee and enters with fee + 1 lamport. Exits non-zero on any
//! failure.

use std::rc::Rc;
use std::str::FromStr;

use anchor_client::solana_sdk::commitment_config::CommitmentConfig;
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::signature::read_keypair_file;
use anchor_client::{Client, Cluster};
use anyhow::anyhow;

fn cluster_from_env() -> anyhow::Result<Cluster> {
    match std::env::var("LOTTERY_CLUSTER") {
        Ok(s) => Cluster::from_str(&s).map_err(|e| anyhow!("bad LOTTERY_CLUSTER: {}", e)),
        Err(_) => Ok(Cluster::Localnet),
    }
}

fn keypair_path_from_env() -> String {
    std::env::var("LOTTERY_KEYPAIR").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        format!("{}/.config/solana/id.json", home)
    })
}

fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    env_logger::init();

    let cluster = cluster_from_env()?;
    let keypair_path = keypair_path_from_env();
    let payer = read_keypair_file(&keypair_path)
        .map_err(|e| anyhow!("failed to read keypair {}: {}", keypair_path, e))?;

    let client = Client::new_with_options(cluster, Rc::new(payer), CommitmentConfig::confirmed());
    let program = client.program(lottery::ID)?;

    let (config_pda, _) = Pubkey::find_program_address(&[lottery::CONFIG_SEED], &lottery::ID);
    let (lottery_pda, _) = Pubkey::find_program_address(&[lottery::LOTTERY_SEED], &lottery::ID);
    let (vault_pda, _) = Pubkey::find_program_address(&[lottery::VAULT_SEED], &lottery::ID);

    let state: lottery::state::Lottery = program.account(lottery_pda)?;
    let entrance_fee = state.entrance_fee();
    log::info!("entrance fee: {} lamports", entrance_fee);

    let signature = program
        .request()
        .accounts(lottery::accounts::EnterLottery {
            config: config_pda,
            lottery: lottery_pda,
            vault: vault_pda,
            player: program.payer(),
            system_program: anchor_client::solana_sdk::system_program::ID,
        })
        .args(lottery::instruction::EnterLottery {
            amount: entrance_fee + 1,
        })
        .send()?;

    log::info!("signature: {}", signature);
    println!("Entered!");

    Ok(())
}
