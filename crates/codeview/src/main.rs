use std::path::PathBuf;

use clap::Parser;

/// Terminal code viewer: drop or pick a file, see it with line numbers.
#[derive(Parser)]
#[command(name = "codeview", version, about)]
struct Cli {
    /// File to load on startup instead of showing the drop zone.
    file: Option<PathBuf>,

    /// Hide the line-number gutter.
    #[arg(long)]
    no_line_numbers: bool,
}

fn main() -> anyhow::Result<()> {
    codeview::init();

    let cli = Cli::parse();
    let mut app = codeview::ui::app::UiApp::default();
    if cli.no_line_numbers {
        app.hide_line_numbers();
    }
    app.run(cli.file)
}
