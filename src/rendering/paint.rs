//! Recorded paint commands, for inspecting exactly what a renderer drew

use crate::rendering::Surface;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintCommand {
    Resize {
        width: u64,
        height: u64,
    },
    FillRect {
        x: u64,
        y: u64,
        width: u64,
        height: u64,
        color: String,
    },
}

/// A surface that records every call instead of drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayList {
    commands: Vec<PaintCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PaintCommand> {
        self.commands
    }

    /// Fill commands only, skipping resizes.
    pub fn fills(&self) -> impl Iterator<Item = &PaintCommand> {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, PaintCommand::FillRect { .. }))
    }
}

impl Surface for DisplayList {
    fn resize(&mut self, width: u64, height: u64) -> Result<()> {
        self.commands.push(PaintCommand::Resize { width, height });
        Ok(())
    }

    fn fill_rect(&mut self, x: u64, y: u64, width: u64, height: u64, color: &str) -> Result<()> {
        self.commands.push(PaintCommand::FillRect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
        Ok(())
    }
}
