//! Display sinks and the viewer loop seam.
//!
//! The animation only talks to [`DisplaySink`]: it registers named solids and
//! expects a later registration under the same name to replace the earlier
//! one. A [`Viewer`] additionally owns the frame loop and calls a single step
//! callback once per tick.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use articula_mesh::{export::write_obj, Solid};

use crate::error::Result;

/// How a registered solid is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayOptions {
    /// RGB in `[0, 1]`.
    pub color: [f32; 3],
    /// 0 is opaque, 1 invisible.
    pub transparency: f32,
}

impl DisplayOptions {
    /// Orange, half transparent: stationary parts.
    pub const FIXED: Self = Self {
        color: [1.0, 0.6, 0.2],
        transparency: 0.5,
    };

    /// Light grey: moving parts.
    pub const MOVING: Self = Self {
        color: [0.8, 0.8, 0.8],
        transparency: 0.4,
    };
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::MOVING
    }
}

/// Anything that can show named solids.
pub trait DisplaySink {
    /// Show `solid` under `name`, replacing whatever was registered there.
    fn register(&mut self, name: &str, solid: &Solid, options: &DisplayOptions);
}

/// Per-tick callback installed on a viewer.
pub type StepCallback = Box<dyn FnMut(&mut dyn DisplaySink) -> Result<()>>;

/// A display sink that owns the frame loop.
pub trait Viewer: DisplaySink {
    /// Install the callback run once per tick. Replaces any previous one.
    fn set_step_callback(&mut self, callback: StepCallback);

    /// Run the loop until the viewer stops. Errors from the callback end the
    /// loop and are returned.
    fn run(&mut self) -> Result<()>;
}

/// The latest registration under one name.
#[derive(Debug, Clone)]
pub struct RegisteredPart {
    /// Geometry as registered.
    pub solid: Solid,
    /// Display options as registered.
    pub options: DisplayOptions,
    /// Tick during which it was registered.
    pub tick: u64,
}

/// A viewer without a window: runs a fixed number of ticks, keeps the
/// current scene in memory and can dump every tick as OBJ files.
pub struct HeadlessViewer {
    parts: BTreeMap<String, RegisteredPart>,
    callback: Option<StepCallback>,
    max_ticks: u64,
    tick: u64,
    dump_dir: Option<PathBuf>,
}

impl HeadlessViewer {
    /// Viewer that stops after `max_ticks` ticks.
    pub fn new(max_ticks: u64) -> Self {
        Self {
            parts: BTreeMap::new(),
            callback: None,
            max_ticks,
            tick: 0,
            dump_dir: None,
        }
    }

    /// Write `<tick>_<name>.obj` into `dir` after every tick.
    pub fn with_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }

    /// Current scene, by name.
    pub fn parts(&self) -> &BTreeMap<String, RegisteredPart> {
        &self.parts
    }

    /// One registered part.
    pub fn part(&self, name: &str) -> Option<&RegisteredPart> {
        self.parts.get(name)
    }

    /// Ticks completed so far.
    pub fn ticks_run(&self) -> u64 {
        self.tick
    }

    fn dump(&self, dir: &std::path::Path) -> Result<()> {
        for (name, part) in &self.parts {
            let path = dir.join(format!("{:05}_{name}.obj", self.tick));
            write_obj(&part.solid, name, path)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HeadlessViewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessViewer")
            .field("parts", &self.parts.keys().collect::<Vec<_>>())
            .field("has_callback", &self.callback.is_some())
            .field("max_ticks", &self.max_ticks)
            .field("tick", &self.tick)
            .field("dump_dir", &self.dump_dir)
            .finish()
    }
}

impl DisplaySink for HeadlessViewer {
    fn register(&mut self, name: &str, solid: &Solid, options: &DisplayOptions) {
        self.parts.insert(
            name.to_string(),
            RegisteredPart {
                solid: solid.clone(),
                options: *options,
                tick: self.tick,
            },
        );
    }
}

impl Viewer for HeadlessViewer {
    fn set_step_callback(&mut self, callback: StepCallback) {
        self.callback = Some(callback);
    }

    fn run(&mut self) -> Result<()> {
        let Some(mut callback) = self.callback.take() else {
            tracing::warn!("no step callback installed, nothing to run");
            return Ok(());
        };
        if let Some(dir) = &self.dump_dir {
            std::fs::create_dir_all(dir)?;
        }

        let mut outcome = Ok(());
        for _ in 0..self.max_ticks {
            if let Err(e) = callback(&mut *self as &mut dyn DisplaySink) {
                outcome = Err(e);
                break;
            }
            if let Some(dir) = self.dump_dir.clone() {
                if let Err(e) = self.dump(&dir) {
                    outcome = Err(e);
                    break;
                }
            }
            tracing::debug!(
                tick = self.tick,
                parts = self.parts.len(),
                triangles = self.parts.values().map(|p| p.solid.num_triangles()).sum::<usize>(),
                "tick"
            );
            self.tick += 1;
        }

        self.callback = Some(callback);
        tracing::info!(ticks = self.tick, parts = self.parts.len(), "viewer stopped");
        outcome
    }
}
