use qstrgen::{
    cli::Args,
    emit::{Config, TableEmitter},
    parse::Parser,
};

use anyhow::{Context, Result};

use std::io::Write;

fn main() {
    let args = Args::from_cli();
    if let Err(e) = try_main(&args) {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

fn try_main(args: &Args) -> Result<()> {
    // Scan every input before deciding anything: config overwrites and
    // qstr deduplication are sensitive to source order.
    let mut parser = Parser::new();
    for path in &args.inputs {
        parser
            .parse_file(path)
            .context(format!("Failed to read input file {}", path.display()))?;
    }
    let parsed = parser.finish()?;

    let cfg = Config::from_map(&parsed.cfg)?;
    let table = TableEmitter::new(cfg, &parsed.qstrs).emit()?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(table.as_bytes())
        .context("Failed to write qstr table to stdout")?;
    Ok(())
}
