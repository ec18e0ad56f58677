use colored::Colorize;
use enumgen_emitter::GeneratedUnit;

/// Formats errors and warnings of the batch tool for stderr.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// `error: outer: inner: ...` over the whole error chain.
    pub fn format_error(&self, err: &anyhow::Error) -> String {
        let mut output = self.label("error", false);
        output.push_str(": ");
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        output.push_str(&chain.join(": "));
        output
    }

    /// Warning for a unit whose generated text is not valid Go. The file is
    /// still written so the problem can be inspected.
    pub fn format_invalid_unit(&self, unit: &GeneratedUnit) -> String {
        let mut output = self.label("warning", true);
        output.push_str(&format!(
            ": internal error: invalid Go generated for {}",
            unit.type_name
        ));
        for diagnostic in &unit.syntax_diagnostics {
            output.push_str("\n  ");
            output.push_str(diagnostic);
        }
        output
    }

    fn label(&self, text: &str, warning: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        if warning {
            text.yellow().bold().to_string()
        } else {
            text.red().bold().to_string()
        }
    }
}
