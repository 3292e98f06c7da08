use std::io::{self, Write};

use crate::tools::runner::CommandOutput;

/// Captured stdout/stderr of the most recent step, drained after every step.
#[derive(Debug, Default)]
pub struct OutputBuffers {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl OutputBuffers {
    pub fn capture(&mut self, output: &mut CommandOutput) {
        self.stdout.append(&mut output.stdout);
        self.stderr.append(&mut output.stderr);
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Print stderr then stdout (skipping empty ones) and reset both.
    pub fn report(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        write_block(out, &self.stderr)?;
        write_block(out, &self.stdout)?;
        out.flush()?;
        self.clear();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.stdout.clear();
        self.stderr.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }
}

fn write_block(out: &mut impl Write, block: &[u8]) -> io::Result<()> {
    if block.is_empty() {
        return Ok(());
    }
    out.write_all(block)?;
    if !block.ends_with(b"\n") {
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_prints_stderr_before_stdout_and_clears() {
        let mut buffers = OutputBuffers {
            stdout: b"Initialized empty Git repository\n".to_vec(),
            stderr: b"go: creating new go.mod".to_vec(),
        };
        let mut out = Vec::new();

        buffers.report(&mut out).expect("report");

        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "go: creating new go.mod\nInitialized empty Git repository\n"
        );
        assert!(buffers.is_empty());
    }

    #[test]
    fn report_skips_empty_buffers() {
        let mut buffers = OutputBuffers::default();
        let mut out = Vec::new();
        buffers.report(&mut out).expect("report");
        assert!(out.is_empty());
    }

    #[test]
    fn capture_drains_command_output() {
        let mut buffers = OutputBuffers::default();
        let mut output = CommandOutput {
            success: true,
            code: Some(0),
            stdout: b"out".to_vec(),
            stderr: b"err".to_vec(),
        };

        buffers.capture(&mut output);

        assert!(output.stdout.is_empty() && output.stderr.is_empty());
        assert_eq!(buffers.stdout, b"out");
        assert_eq!(buffers.stderr_text(), "err");
    }
}
