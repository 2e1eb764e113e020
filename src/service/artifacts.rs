use crate::error::DeskError;
use qrcode::QrCode;
use qrcode::render::svg;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// One QR image per queue, stored as `<dir>/queue_<id>.svg`.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, queue_id: i64) -> PathBuf {
        self.dir.join(format!("queue_{queue_id}.svg"))
    }

    /// Encode `link` as a QR code and write it for `queue_id`.
    pub async fn write(&self, queue_id: i64, link: &str) -> Result<PathBuf, DeskError> {
        let image = render_svg(link)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(queue_id);
        tokio::fs::write(&path, image).await?;
        debug!(queue_id, path = %path.display(), "join artifact written");
        Ok(path)
    }

    pub async fn read(&self, queue_id: i64) -> Result<Option<String>, DeskError> {
        match tokio::fs::read_to_string(self.path_for(queue_id)).await {
            Ok(svg) => Ok(Some(svg)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the artifact; a missing file counts as removed.
    pub async fn remove(&self, queue_id: i64) -> Result<(), DeskError> {
        match tokio::fs::remove_file(self.path_for(queue_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn render_svg(link: &str) -> Result<String, DeskError> {
    let code = QrCode::new(link.as_bytes())?;
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(200, 200)
        .quiet_zone(true)
        .build())
}
