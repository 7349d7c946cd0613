//! Editor surface contract and the in-memory editor used by the front ends.

use std::fmt;

use super::error::SurfaceError;
use crate::range::{EditDelta, LineIndex, PositionalEdit, RangeError};

/// What the scheduler asks the editor surface to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand<'a> {
    /// Register an empty buffer (tab) for a file
    Register { file: &'a str, language: &'a str },
    /// Apply an incremental edit to the displayed file
    Edit {
        file: &'a str,
        edit: &'a PositionalEdit,
    },
    /// Show `file` with exactly `text`
    Replace { file: &'a str, text: &'a str },
    /// Drop every buffer
    Clear,
}

impl fmt::Display for SurfaceCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register { file, language } => write!(f, "register {} ({})", file, language),
            Self::Edit { file, edit } => write!(f, "edit {} {}", file, edit),
            Self::Replace { file, text } => {
                write!(f, "replace {} ({} chars)", file, text.chars().count())
            }
            Self::Clear => write!(f, "clear"),
        }
    }
}

/// A text editor that displays one file at a time.
pub trait EditorSurface {
    fn apply(&mut self, command: SurfaceCommand<'_>) -> Result<(), SurfaceError>;

    /// Text of the displayed buffer.
    fn text(&self) -> &str;
}

/// A registered buffer tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub file: String,
    pub language: String,
}

/// In-memory editor surface.
#[derive(Debug, Clone, Default)]
pub struct EditorView {
    tabs: Vec<Tab>,
    displayed: Option<String>,
    text: String,
    last_edit: Option<PositionalEdit>,
    edit_count: usize,
    replace_count: usize,
}

impl EditorView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn displayed(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    /// Most recent incremental edit, cleared by full replaces.
    pub fn last_edit(&self) -> Option<&PositionalEdit> {
        self.last_edit.as_ref()
    }

    /// 1-based line of the most recent edit's end, where the cursor sits.
    pub fn cursor_line(&self) -> Option<usize> {
        self.last_edit.as_ref().map(|edit| {
            edit.start_line + edit.replacement.matches('\n').count()
        })
    }

    pub fn edit_count(&self) -> usize {
        self.edit_count
    }

    pub fn replace_count(&self) -> usize {
        self.replace_count
    }

    fn apply_edit(&mut self, file: &str, edit: &PositionalEdit) -> Result<(), SurfaceError> {
        match self.displayed.as_deref() {
            Some(displayed) if displayed == file => {}
            other => {
                return Err(SurfaceError::NotDisplayed {
                    file: file.to_string(),
                    displayed: other.unwrap_or_default().to_string(),
                })
            }
        }

        let index = LineIndex::new(&self.text);
        let start = index.offset_of(edit.start())?;
        let end = index.offset_of(edit.end())?;
        let length = end
            .checked_sub(start)
            .ok_or(RangeError::InvalidPosition {
                line: edit.end_line,
                column: edit.end_column,
            })?;

        self.text = EditDelta::new(start, length, edit.replacement.as_str()).apply(&self.text)?;
        self.last_edit = Some(edit.clone());
        self.edit_count += 1;
        Ok(())
    }
}

impl EditorSurface for EditorView {
    fn apply(&mut self, command: SurfaceCommand<'_>) -> Result<(), SurfaceError> {
        match command {
            SurfaceCommand::Register { file, language } => {
                if !self.tabs.iter().any(|t| t.file == file) {
                    self.tabs.push(Tab {
                        file: file.to_string(),
                        language: language.to_string(),
                    });
                }
            }
            SurfaceCommand::Edit { file, edit } => self.apply_edit(file, edit)?,
            SurfaceCommand::Replace { file, text } => {
                self.displayed = Some(file.to_string());
                self.text = text.to_string();
                self.last_edit = None;
                self.replace_count += 1;
            }
            SurfaceCommand::Clear => *self = Self::default(),
        }
        Ok(())
    }

    fn text(&self) -> &str {
        &self.text
    }
}
