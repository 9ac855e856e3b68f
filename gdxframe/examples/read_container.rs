//! Open a container lazily, list its symbols and print one of them
//!
//! ```text
//! cargo run --example read_container -- transport.json d
//! ```

use gdxframe::{ContainerSession, JsonCodec, SessionConfig};
use tracing_subscriber::EnvFilter;

fn main() -> gdxframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gdxframe=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "transport.json".to_string());
    let wanted = args.next();

    let mut session = ContainerSession::open(JsonCodec::new(), &path, SessionConfig::lazy())?;
    if let Some(version) = session.version() {
        println!("{path}: version {} written by {}", version.version, version.producer);
    }

    for symbol in session.symbols() {
        println!(
            "  {:<12} {:<20} dims={:?} {:?}",
            symbol.name(),
            symbol.full_typename(),
            symbol.dims(),
            symbol.load_state()
        );
    }

    let Some(name) = wanted else {
        return Ok(());
    };
    session.load(name.as_str())?;
    let symbol = session.get(name.as_str())?;
    println!("\n{symbol}");
    let records = symbol.records();
    let header: Vec<String> = records.columns().iter().map(ToString::to_string).collect();
    println!("{}", header.join("\t"));
    for row in records.rows() {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}", cells.join("\t"));
    }
    Ok(())
}
