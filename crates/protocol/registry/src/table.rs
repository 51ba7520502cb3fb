//! Pretty-printing of registry presets, used by the `genesis` CLI subcommand.

use tabled::Tabled;

use crate::PRESETS;

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "L2 Chain ID")]
    l2_chain_id: u64,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "L1 Genesis Block")]
    l2_genesis_l1_block: u64,
}

/// Prints every known preset as a table to stdout.
pub fn print_presets() {
    let mut rows: Vec<PresetRow> = PRESETS
        .values()
        .map(|cfg| PresetRow {
            l2_chain_id: cfg.l2_chain_id.id(),
            network: format!("{:?}", cfg.network),
            l2_genesis_l1_block: cfg.l2_genesis_l1_block,
        })
        .collect();
    rows.sort_by_key(|row| row.l2_chain_id);
    println!("{}", tabled::Table::new(rows));
}
