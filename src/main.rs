use ledger_graph::{build_graph, write_graph};

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        anyhow::bail!(
            "usage: {} holders.csv transactions.csv > graph.json",
            args[0]
        );
    }
    let holders = std::fs::read_to_string(&args[1])?;
    let transactions = std::fs::read_to_string(&args[2])?;
    let graph = build_graph(&holders, &transactions)?;
    write_graph(std::io::stdout().lock(), &graph)?;
    Ok(())
}
