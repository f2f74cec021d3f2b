//! Console progress output.
//!
//! Human-readable only; tracing carries the diagnostics.

use std::fmt::Display;
use std::io::Write;

use crate::step::{Step, CAPABILITIES};

pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn header(&mut self) {
        self.line("🧪 Database Integration Verification\n");
    }

    pub fn database_url_found(&mut self, found: bool) {
        let answer = if found { "✅ Yes" } else { "❌ No" };
        self.line(format!("DATABASE_URL found: {answer}"));
    }

    pub fn start(&mut self, step: Step) {
        let lead = if step.number() == 1 { "" } else { "\n" };
        self.line(format!("{lead}{}. Testing {}...", step.number(), step.label()));
    }

    pub fn ok(&mut self, detail: impl Display) {
        self.line(format!("   ✅ {detail}"));
    }

    pub fn warn(&mut self, detail: impl Display) {
        self.line(format!("   ⚠️  {detail}"));
    }

    pub fn failed(&mut self, error: impl Display) {
        self.line(format!("❌ Error during verification: {error}"));
    }

    pub fn passed(&mut self) {
        self.line("\n🎉 ALL TESTS PASSED! Database integration is fully working.");
        self.line("\n📋 Summary of capabilities verified:");
        for capability in CAPABILITIES {
            self.line(format!("   ✅ {capability}: Working"));
        }
    }

    fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "Failed to write progress line");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Reporter<Vec<u8>>)) -> String {
        let mut reporter = Reporter::new(Vec::new());
        f(&mut reporter);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn first_step_has_no_leading_blank_line() {
        let out = render(|r| {
            r.start(Step::SqlConnect);
            r.ok("created");
            r.start(Step::SqlLiteral);
        });
        assert_eq!(
            out,
            "1. Testing SQL client connection...\n   ✅ created\n\n2. Testing simple SQL query...\n"
        );
    }

    #[test]
    fn summary_lists_every_capability() {
        let out = render(|r| r.passed());
        for capability in CAPABILITIES {
            assert!(out.contains(&format!("✅ {capability}: Working")));
        }
    }
}
