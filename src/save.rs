//! Obstacle persistence: a plain-text, line-oriented snapshot of the world's
//! obstacle ring.
//!
//! Format:
//!
//! ```text
//! <capacity>
//! <count>
//! <x> <y> <width> <height>      (count times, 2-decimal fixed)
//! ```
//!
//! Save truncates and rewrites the whole file. Load replaces the in-memory
//! ring entirely, adopting the capacity declared in the file (bounded to
//! [1, `MAX_LOADED_CAPACITY`]). A missing file on load is a no-op
//! (`Ok(None)`), never an error surfaced to the frame loop. A record that
//! does not parse as four floats is skipped with a warning rather than
//! half-read into an obstacle with undefined trailing fields (see
//! DESIGN.md).

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use bevy::prelude::*;

use crate::constants::MAX_LOADED_CAPACITY;
use crate::error::{SimError, SimResult};
use crate::obstacle::Obstacle;
use crate::ring::RingBuffer;
use crate::world::ParticleWorld;

/// Colour assigned to every loaded obstacle (the format does not store one).
const LOADED_OBSTACLE_COLOR: Color = Color::WHITE;

/// Writes the world's obstacle ring to `path`, truncating any existing file.
pub fn save_obstacles(world: &ParticleWorld, path: &Path) -> SimResult<()> {
    let obstacles = world.obstacles();
    let mut out = String::new();
    // Infallible: writing into a String cannot fail.
    let _ = writeln!(out, "{}", obstacles.capacity());
    let _ = writeln!(out, "{}", obstacles.len());
    for o in obstacles {
        let _ = writeln!(
            out,
            "{:.2} {:.2} {:.2} {:.2}",
            o.rect.min.x,
            o.rect.min.y,
            o.rect.width(),
            o.rect.height()
        );
    }
    fs::write(path, out).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads an obstacle ring from `path`.
///
/// Returns `Ok(None)` when the file does not exist; every other I/O failure
/// is an error. The returned ring uses the capacity declared in the file.
pub fn load_obstacles(path: &Path) -> SimResult<Option<RingBuffer<Obstacle>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SimError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut lines = contents.lines();

    let capacity: i64 = lines
        .next()
        .and_then(|l| l.trim().parse().ok())
        .ok_or(SimError::MalformedSave {
            path: path.to_path_buf(),
            line: 1,
        })?;
    // Bounded on both sides: the capacity sizes an up-front allocation, so a
    // huge value from a corrupt file must fail cleanly instead of aborting
    // inside the allocator.
    if !(1..=MAX_LOADED_CAPACITY).contains(&capacity) {
        return Err(SimError::InvalidCapacity { found: capacity });
    }

    let declared_count: usize = lines
        .next()
        .and_then(|l| l.trim().parse().ok())
        .ok_or(SimError::MalformedSave {
            path: path.to_path_buf(),
            line: 2,
        })?;

    let mut ring = RingBuffer::new(capacity as usize);
    for (i, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line) {
            Some((pos, dim)) => ring.push(Obstacle::new(pos, dim, LOADED_OBSTACLE_COLOR)),
            None => {
                // Skip, don't guess: a short record would otherwise produce
                // an obstacle with undefined fields.
                eprintln!(
                    "[LOAD] skipping malformed obstacle record at {}:{}",
                    path.display(),
                    i + 3
                );
            }
        }
    }

    if ring.len() != declared_count {
        eprintln!(
            "[LOAD] {} declared {} obstacles, read {}",
            path.display(),
            declared_count,
            ring.len()
        );
    }

    Ok(Some(ring))
}

/// Parses one `<x> <y> <w> <h>` record; `None` unless all four fields parse.
fn parse_record(line: &str) -> Option<(Vec2, Vec2)> {
    let mut fields = line.split_whitespace();
    let x: f32 = fields.next()?.parse().ok()?;
    let y: f32 = fields.next()?.parse().ok()?;
    let w: f32 = fields.next()?.parse().ok()?;
    let h: f32 = fields.next()?.parse().ok()?;
    Some((Vec2::new(x, y), Vec2::new(w, h)))
}
