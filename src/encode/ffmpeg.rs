use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::config::TitleConfig;
use crate::encode::sink::{FrameSink, SinkConfig, check_order, ensure_parent_dir};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{TitleError, TitleResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

/// H.264 MP4 output through the system `ffmpeg` binary.
///
/// Frames are composited over the title background (its alpha is ignored) and streamed as
/// raw RGBA on `ffmpeg`'s stdin. An existing output file is replaced.
pub struct FfmpegSink {
    out_path: PathBuf,
    background: Rgba8,
    encoder: Option<Encoder>,
    opaque: Vec<u8>,
}

struct Encoder {
    cfg: SinkConfig,
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
    last: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Sink writing `out_path`, flattening frames over `background`.
    pub fn new(out_path: impl Into<PathBuf>, background: Rgba8) -> Self {
        Self {
            out_path: out_path.into(),
            background,
            encoder: None,
            opaque: Vec::new(),
        }
    }

    /// Sink using the title's background color.
    pub fn from_config(out_path: impl Into<PathBuf>, cfg: &TitleConfig) -> Self {
        Self::new(out_path, cfg.background)
    }

    /// Output file path.
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    /// Color that transparent pixels are composited over.
    pub fn background(&self) -> Rgba8 {
        self.background
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> TitleResult<()> {
        cfg.check_non_empty()?;
        // yuv420p subsamples chroma 2x2.
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(TitleError::validation(format!(
                "mp4 output needs even dimensions (got {}x{})",
                cfg.width, cfg.height
            )));
        }
        ensure_parent_dir(&self.out_path)?;

        let mut child = Command::new("ffmpeg")
            .args(encoder_args(&cfg, &self.out_path))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TitleError::encode(format!("cannot start ffmpeg: {e}")))?;
        let (Some(stdin), Some(mut stderr)) = (child.stdin.take(), child.stderr.take()) else {
            return Err(TitleError::encode("ffmpeg pipes unavailable"));
        };
        let stderr = std::thread::spawn(move || {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf)?;
            Ok::<_, std::io::Error>(buf)
        });

        tracing::debug!(
            out = %self.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "ffmpeg started"
        );
        self.encoder = Some(Encoder {
            cfg,
            child,
            stdin,
            stderr,
            last: None,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> TitleResult<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Err(TitleError::encode("ffmpeg sink not started"));
        };
        encoder.cfg.check_frame(frame)?;
        check_order(encoder.last, idx)?;
        encoder.last = Some(idx);

        flatten_over(&mut self.opaque, frame, self.background);
        encoder
            .stdin
            .write_all(&self.opaque)
            .map_err(|e| TitleError::encode(format!("write frame {} to ffmpeg: {e}", idx.0)))
    }

    fn end(&mut self) -> TitleResult<()> {
        let Encoder {
            mut child,
            stdin,
            stderr,
            last,
            ..
        } = self
            .encoder
            .take()
            .ok_or_else(|| TitleError::encode("ffmpeg sink not started"))?;
        drop(stdin);

        let status = child
            .wait()
            .map_err(|e| TitleError::encode(format!("wait for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| TitleError::encode("ffmpeg stderr reader panicked"))?
            .map_err(|e| TitleError::encode(format!("read ffmpeg stderr: {e}")))?;
        if !status.success() {
            return Err(TitleError::encode(format!(
                "ffmpeg failed ({status}): {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        tracing::info!(
            out = %self.out_path.display(),
            frames = last.map_or(0, |i| i.0 + 1),
            "mp4 written"
        );
        Ok(())
    }
}

/// Composite `frame` over `background` into opaque RGBA8 bytes in `out`.
fn flatten_over(out: &mut Vec<u8>, frame: &FrameRGBA, background: Rgba8) {
    out.resize(frame.data.len(), 0);
    let bg = [background.r, background.g, background.b];
    for (dst, src) in out.chunks_exact_mut(4).zip(frame.data.chunks_exact(4)) {
        let src = if frame.premultiplied {
            [src[0], src[1], src[2], src[3]]
        } else {
            Rgba8 {
                r: src[0],
                g: src[1],
                b: src[2],
                a: src[3],
            }
            .premultiplied()
        };
        let uncovered = 255 - u16::from(src[3]);
        for ((d, &s), b) in dst[..3].iter_mut().zip(&src[..3]).zip(bg) {
            *d = (u16::from(s) + mul_div255_u16(u16::from(b), uncovered)).min(255) as u8;
        }
        dst[3] = 255;
    }
}

/// Arguments for encoding raw RGBA frames of `cfg` from stdin into `out`.
fn encoder_args(cfg: &SinkConfig, out: &Path) -> Vec<std::ffi::OsString> {
    let size = format!("{}x{}", cfg.width, cfg.height);
    // `-r` before `-i` sets the rate of the raw input stream.
    let rate = format!("{}/{}", cfg.fps.num, cfg.fps.den);
    let mut args: Vec<std::ffi::OsString> = [
        "-y", "-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba", "-s", size.as_str(), "-r",
        rate.as_str(), "-i", "pipe:0", "-an", "-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags",
        "+faststart",
    ]
    .into_iter()
    .map(Into::into)
    .collect();
    args.push(out.as_os_str().to_owned());
    args
}

/// `true` when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
