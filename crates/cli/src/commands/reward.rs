// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use nrt_kernel::reward::reward_for;

pub fn run(quality: i64) -> anyhow::Result<()> {
    let reward = reward_for(quality);
    println!("Data quality {}% -> {} tokens ({})", quality, reward.quantity, reward.tier);
    if !reward.is_mint_eligible() {
        println!("Not eligible for minting.");
    }
    Ok(())
}
