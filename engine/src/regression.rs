//! Render-hash regression helpers.
//!
//! A scenario is run headlessly, every state is rendered into an offscreen RGBA buffer and each
//! frame is reduced to a SHA-256 hex digest. Digests can be compared across runs (determinism)
//! or against a golden JSON file checked into `tests/goldens/`.
//!
//! The engine stays game-agnostic by requiring a caller-provided renderer closure.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    GameLogic, HeadlessRunner,
    graphics::CpuRenderer,
    surface::{RgbaBufferSurface, SurfaceSize},
};

/// Environment flag helper: accepts `1/true/yes/on` (case-insensitive).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Environment flag that lets regression tests rewrite golden files in place.
pub const UPDATE_GOLDENS_ENV: &str = "ENGINE_UPDATE_GOLDENS";

pub fn update_goldens_enabled() -> bool {
    env_flag(UPDATE_GOLDENS_ENV)
}

pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[macro_export]
macro_rules! regression_golden_path {
    ($name:expr) => {{
        let base = $crate::regression::sanitize_filename($name);
        ::std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("goldens")
            .join(format!("{base}.json"))
    }};
}

pub fn rgba_sha256_hex(rgba: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rgba);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameHashGolden {
    pub version: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub hash_alg: String,
    /// One hash per state, initial state first.
    pub hashes: Vec<String>,
}

impl FrameHashGolden {
    pub fn new(name: impl Into<String>, width: u32, height: u32, hashes: Vec<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            width,
            height,
            hash_alg: "sha256".to_string(),
            hashes,
        }
    }
}

/// Runs `inputs` through a fresh `HeadlessRunner` and hashes the rendering of every state.
pub fn render_hashes<G, Render>(
    game: G,
    inputs: impl IntoIterator<Item = G::Input>,
    size: SurfaceSize,
    mut render: Render,
) -> Vec<String>
where
    G: GameLogic,
    Render: FnMut(&G::State, &mut CpuRenderer<'_>),
{
    let mut runner = HeadlessRunner::new(game);
    runner.run(inputs);

    let mut surface = RgbaBufferSurface::new(size);
    runner
        .history()
        .iter()
        .map(|state| {
            render(state, &mut surface.renderer());
            rgba_sha256_hex(surface.frame())
        })
        .collect()
}

/// Renders the same scenario twice and fails if any frame differs between the runs.
pub fn replay_and_compare_render_hashes<G, Render>(
    game: G,
    inputs: &[G::Input],
    size: SurfaceSize,
    mut render: Render,
) -> io::Result<Vec<String>>
where
    G: GameLogic + Clone,
    G::Input: Clone,
    Render: FnMut(&G::State, &mut CpuRenderer<'_>),
{
    let live = render_hashes(game.clone(), inputs.iter().cloned(), size, &mut render);
    let replay = render_hashes(game, inputs.iter().cloned(), size, &mut render);

    if live.len() != replay.len() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!(
                "replay frame count differed: live={} replay={}",
                live.len(),
                replay.len()
            ),
        ));
    }
    for (i, (a, b)) in live.iter().zip(replay.iter()).enumerate() {
        if a != b {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("frame {i} differed between runs:\nlive:   {a}\nreplay: {b}"),
            ));
        }
    }
    Ok(live)
}

pub fn load_golden_json(path: impl AsRef<Path>) -> io::Result<FrameHashGolden> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("failed parsing golden json {}: {e}", path.display()),
        )
    })
}

pub fn save_golden_json(path: impl AsRef<Path>, golden: &FrameHashGolden) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, golden)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    writer.flush()?;
    Ok(())
}

/// Compares `golden` with the file at `path`.
///
/// A missing file is written instead of compared; `update` rewrites an existing one.
pub fn assert_or_update_golden_json(
    path: impl AsRef<Path>,
    golden: &FrameHashGolden,
    update: bool,
) -> io::Result<()> {
    let path = path.as_ref();
    let exists = path.exists();

    if update || !exists {
        save_golden_json(path, golden)?;
        if exists {
            info!("updated golden: {}", path.display());
        } else {
            info!("wrote golden: {}", path.display());
        }
        return Ok(());
    }

    let expected = load_golden_json(path)?;
    if expected.version != golden.version
        || expected.hash_alg != golden.hash_alg
        || expected.width != golden.width
        || expected.height != golden.height
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "golden metadata mismatch at {}:\nexpected: v{} alg={} {}x{}\nactual:   v{} alg={} {}x{}\n(hint: set {UPDATE_GOLDENS_ENV}=1 to rewrite)",
                path.display(),
                expected.version,
                expected.hash_alg,
                expected.width,
                expected.height,
                golden.version,
                golden.hash_alg,
                golden.width,
                golden.height
            ),
        ));
    }

    if expected.hashes.len() != golden.hashes.len() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!(
                "golden frame count mismatch at {}: expected {} hashes, got {}\n(hint: set {UPDATE_GOLDENS_ENV}=1 to rewrite)",
                path.display(),
                expected.hashes.len(),
                golden.hashes.len()
            ),
        ));
    }

    for (i, (a, b)) in expected.hashes.iter().zip(golden.hashes.iter()).enumerate() {
        if a != b {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "golden mismatch at {} (frame {i}):\nexpected: {a}\nactual:   {b}\n(hint: set {UPDATE_GOLDENS_ENV}=1 to rewrite)",
                    path.display()
                ),
            ));
        }
    }

    Ok(())
}
