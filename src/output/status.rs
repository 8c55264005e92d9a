//! Console status messages
//!
//! Human-facing progress lines printed around a walk. Kept separate from the
//! JSON document so `--stdout` output stays machine-readable.

use std::io::{self, Write};
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::stats::WalkStats;

const RULE_WIDTH: usize = 72;

/// Writes status lines to stdout, optionally colored.
pub struct StatusPrinter {
    stdout: StandardStream,
    quiet: bool,
}

impl StatusPrinter {
    pub fn new(choice: ColorChoice, quiet: bool) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
            quiet,
        }
    }

    fn write_tag(&mut self, tag: &str, color: Color) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(self.stdout, "[{}]", tag)?;
        self.stdout.reset()?;
        write!(self.stdout, " ")
    }

    pub fn banner(&mut self) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        writeln!(self.stdout, "dir-graph {}", env!("CARGO_PKG_VERSION"))?;
        self.stdout.reset()?;
        writeln!(self.stdout, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(
            self.stdout,
            "Visualize directory structures as interactive graphs."
        )?;
        writeln!(
            self.stdout,
            "Directories containing many big files may take a while to process."
        )?;
        writeln!(self.stdout, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(self.stdout)
    }

    pub fn analyzing(&mut self, target: &Path) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_tag("INFO", Color::Green)?;
        writeln!(self.stdout, "Analyzing {}", target.display())
    }

    pub fn summary(&mut self, stats: &WalkStats) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_tag("INFO", Color::Green)?;
        writeln!(self.stdout, "{}", stats.summary())?;
        if let Some(at) = stats.budget_exhausted_at {
            self.write_tag("WARNING", Color::Yellow)?;
            writeln!(
                self.stdout,
                "Time budget ran out after {:.2}s; later file sizes are unknown (shown as 0)",
                at.as_secs_f64()
            )?;
        }
        Ok(())
    }

    /// Report the written document. Always printed, even when quiet.
    pub fn written(&mut self, path: &Path) -> io::Result<()> {
        self.write_tag("INFO", Color::Green)?;
        writeln!(self.stdout, "Wrote directory structure as JSON: {}", path.display())
    }

    pub fn next_steps(&mut self, output_dir: &Path) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.stdout)?;
        writeln!(self.stdout, "Next steps:")?;
        writeln!(
            self.stdout,
            "  1.  cd {} && python -m http.server 8000",
            output_dir.display()
        )?;
        writeln!(
            self.stdout,
            "  2.  Open http://localhost:8000/index.html in your browser"
        )
    }
}
