// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use nrt_kernel::reward::TIER_TABLE;

pub fn run() -> anyhow::Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Min Quality", "Tokens", "Tier"]);

    for row in TIER_TABLE.iter() {
        let min = if row.min_quality == i64::MIN { "-".to_string() } else { row.min_quality.to_string() };
        table.add_row(vec![min, row.quantity.to_string(), row.tier.label().to_string()]);
    }

    println!("\nReward Tiers\n");
    println!("{table}\n");
    Ok(())
}
