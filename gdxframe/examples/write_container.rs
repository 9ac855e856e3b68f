//! Build a small transport model from plain tables and write it out
//!
//! Run with `RUST_LOG=gdxframe=debug` to see the codec traffic.

use gdxframe::{from_tables, Cell, JsonCodec, SessionConfig, Table};
use tracing_subscriber::EnvFilter;

fn main() -> gdxframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gdxframe=info")),
        )
        .init();

    let plants = Table::from_rows(vec![vec!["seattle".into()], vec!["san-diego".into()]])?;
    let markets = Table::from_rows(vec![
        vec!["new-york".into()],
        vec!["chicago".into()],
        vec!["topeka".into()],
    ])?;

    // Named headers make `i` and `j` the domains of `d`
    let mut distance = Table::new(["i", "j", "Value"]);
    for (plant, market, miles) in [
        ("seattle", "new-york", 2.5),
        ("seattle", "chicago", 1.7),
        ("seattle", "topeka", 1.8),
        ("san-diego", "new-york", 2.5),
        ("san-diego", "chicago", 1.8),
        ("san-diego", "topeka", 1.4),
    ] {
        distance.push_row(vec![plant.into(), market.into(), miles.into()])?;
    }

    // Five trailing value columns make this a variable
    let mut ship = Table::new(["i", "j", "Level", "Marginal", "Lower", "Upper", "Scale"]);
    ship.push_row(vec![
        "seattle".into(),
        "chicago".into(),
        300.0.into(),
        0.0.into(),
        0.0.into(),
        f64::INFINITY.into(),
        1.0.into(),
    ])?;
    ship.push_row(vec![
        "san-diego".into(),
        "topeka".into(),
        Cell::Missing,
        0.0.into(),
        0.0.into(),
        f64::INFINITY.into(),
        1.0.into(),
    ])?;

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "transport.json".to_string());
    let session = from_tables(
        JsonCodec::new(),
        [("i", plants), ("j", markets), ("d", distance), ("x", ship)],
        &path,
        SessionConfig::default(),
    )?;

    for symbol in session.symbols() {
        println!("{symbol}");
    }
    println!("\nWrote {} symbols to {path}", session.symbols().len());
    println!("Run 'cargo run --example read_container -- {path}' to read it back");
    Ok(())
}
