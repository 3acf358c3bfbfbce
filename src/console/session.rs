use super::commands::{parse_command, ConsoleCommand, HELP};
use super::render::{library_view, ring_view, spell_detail};
use crate::catalog::{distinct_classes, distinct_levels, filter_spells, SharedCatalog, SpellFilter};
use crate::import::import_csv_file;
use crate::ring::{save_ring, Ring};
use crate::state::{SessionId, SessionManager};
use crate::types::{PlacementId, SpellId};
use crate::utils::string::level_label;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What the front end should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// One user's console: their ring session, their filters, and the shared catalog.
pub struct Console {
    catalog: SharedCatalog,
    sessions: SessionManager,
    session: SessionId,
    filter: SpellFilter,
    width: usize,
    ring_path: Option<PathBuf>,
}

impl Console {
    pub fn new(
        catalog: SharedCatalog,
        sessions: SessionManager,
        session: SessionId,
        filter: SpellFilter,
    ) -> Self {
        Self {
            catalog,
            sessions,
            session,
            filter,
            width: 80,
            ring_path: None,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Save the ring to `path` after every change
    pub fn persist_to(mut self, path: PathBuf) -> Self {
        self.ring_path = Some(path);
        self
    }

    pub fn filter(&self) -> &SpellFilter {
        &self.filter
    }

    /// Parse and run one input line. Blank lines produce no reply.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<Reply>> {
        match parse_command(line) {
            Ok(Some(command)) => self.execute(command).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Ok(Some(Reply::Text(e.to_string()))),
        }
    }

    pub fn execute(&mut self, command: ConsoleCommand) -> Result<Reply> {
        debug!("Console command: {:?}", command);
        let text = match command {
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::List => self.library()?,
            ConsoleCommand::Search(text) => {
                self.filter.search = text;
                self.library()?
            }
            ConsoleCommand::Class(class) => {
                self.filter.class = class;
                self.library()?
            }
            ConsoleCommand::Level(level) => {
                self.filter.level = level;
                self.library()?
            }
            ConsoleCommand::Reset => {
                self.filter.reset();
                self.library()?
            }
            ConsoleCommand::Classes => {
                let catalog = self.catalog.read();
                let classes: Vec<String> = distinct_classes(catalog.all())
                    .into_iter()
                    .map(|c| if c.is_empty() { "(none)".to_string() } else { c })
                    .collect();
                format!("Classes: {}", classes.join(", "))
            }
            ConsoleCommand::Levels => {
                let catalog = self.catalog.read();
                let levels: Vec<String> = distinct_levels(catalog.all())
                    .into_iter()
                    .map(level_label)
                    .collect();
                format!("Levels: {}", levels.join(", "))
            }
            ConsoleCommand::Show(id) => match self.catalog.read().find(id) {
                Ok(spell) => spell_detail(spell),
                Err(e) => e.to_string(),
            },
            ConsoleCommand::Add { spell_id, upcast } => self.add(spell_id, upcast)?,
            ConsoleCommand::Cast(id) => self.cast(id)?,
            ConsoleCommand::Clear => {
                self.with_ring(|ring| ring.clear())?;
                self.persist();
                "Ring storage cleared".to_string()
            }
            ConsoleCommand::Ring => self.with_ring(|ring| ring_view(ring))?,
            ConsoleCommand::Import(path) => self.import(&path),
            ConsoleCommand::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }

    fn with_ring<R>(&self, f: impl FnOnce(&mut Ring) -> R) -> Result<R> {
        self.sessions
            .with_ring(&self.session, f)
            .ok_or_else(|| anyhow!("Session {} is no longer open", self.session))
    }

    fn library(&self) -> Result<String> {
        let full = self.with_ring(|ring| ring.is_full())?;
        let catalog = self.catalog.read();
        let spells = filter_spells(catalog.all(), &self.filter);
        Ok(library_view(&spells, &self.filter, full, self.width))
    }

    // Locks are always taken ring first, then catalog, and both are released
    // before the ring is written to disk.
    fn add(&self, spell_id: SpellId, upcast: u8) -> Result<String> {
        let outcome = self.with_ring(|ring| {
            let catalog = self.catalog.read();
            let placed = ring
                .add(&catalog, spell_id, upcast)
                .map(|p| (p.spell.name.clone(), p.effective_level()));
            placed.map(|(name, cost)| (name, cost, ring.current_total(), ring.capacity()))
        })?;

        Ok(match outcome {
            Ok((name, cost, total, capacity)) => {
                self.persist();
                format!(
                    "Spell added: {} (costs {}) has been stored in your ring. {}/{} levels used",
                    name, cost, total, capacity
                )
            }
            Err(e) => format!("Cannot add spell: {}", e),
        })
    }

    fn cast(&self, id: PlacementId) -> Result<String> {
        let outcome = self.with_ring(|ring| ring.remove(id))?;
        Ok(match outcome {
            Ok(placement) => {
                self.persist();
                format!(
                    "Spell cast: {} has been cast and removed from your ring",
                    placement.spell.name
                )
            }
            Err(e) => e.to_string(),
        })
    }

    fn import(&self, path: &Path) -> String {
        let mut catalog = self.catalog.write();
        match import_csv_file(&mut catalog, path) {
            Ok(summary) => summary.message(),
            Err(e) => format!("Upload failed: {}", e),
        }
    }

    fn persist(&self) {
        let Some(path) = &self.ring_path else {
            return;
        };
        match self.with_ring(|ring| save_ring(path, ring)) {
            Ok(Ok(())) => debug!("Ring saved to {:?}", path),
            Ok(Err(e)) | Err(e) => warn!("Failed to save ring: {:#}", e),
        }
    }
}
