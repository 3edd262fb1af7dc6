//! Saving server-produced files: Excel exports and chart images.
//!
//! Every file is first written to a temporary file next to its destination and
//! then atomically renamed, so a failed or interrupted download never leaves a
//! partial file behind.

use crate::api::HotelApi;
use crate::api::error::ApiError;
use crate::api::types::{ChartBundle, ChartKind, Comparison, HotelId};
use crate::consts::cli_consts::CHARTS_DIR_NAME;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid chart image: {0}")]
    Image(#[from] base64::DecodeError),

    #[error("Failed to write file: {0}")]
    Io(#[from] io::Error),
}

impl ExportError {
    /// Text to show the user: the server's message, or `fallback`.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            ExportError::Api(e) => e.user_message(fallback),
            _ => fallback,
        }
    }
}

/// What an Excel export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportTarget {
    Hotel(HotelId),
    Global,
}

impl ExportTarget {
    /// Download name, stamped with `date` as `YYYY-MM-DD`.
    pub fn file_name(&self, date: NaiveDate) -> String {
        let stamp = date.format("%Y-%m-%d");
        match self {
            ExportTarget::Hotel(_) => format!("HotelSat_Export_{}.xlsx", stamp),
            ExportTarget::Global => format!("HotelSat_Rapport_Global_{}.xlsx", stamp),
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            ExportTarget::Hotel(_) => "Export Excel téléchargé avec succès",
            ExportTarget::Global => "Rapport global téléchargé avec succès",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            ExportTarget::Hotel(_) => "Erreur lors de l'export Excel",
            ExportTarget::Global => "Erreur lors de l'export global",
        }
    }
}

/// Today's date in the local timezone, used to stamp downloads.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Write `bytes` to `dir/name` through a temporary file.
pub fn save_download(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, io::Error> {
    fs::create_dir_all(dir)?;
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;

    let destination = dir.join(name);
    temp.persist(&destination).map_err(|e| e.error)?;
    Ok(destination)
}

/// Fetch an Excel export and save it under `dir`.
pub async fn download_excel(
    api: &dyn HotelApi,
    target: ExportTarget,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let bytes = match target {
        ExportTarget::Hotel(id) => api.export_hotel_excel(id).await?,
        ExportTarget::Global => api.export_global_excel().await?,
    };
    let size = bytes.len();
    let path = save_off_runtime(dir, target.file_name(date), bytes).await?;
    log::info!("Saved {} bytes to {}", size, path.display());
    Ok(path)
}

/// Run [`save_download`] on the blocking pool.
async fn save_off_runtime(dir: &Path, name: String, bytes: Vec<u8>) -> Result<PathBuf, io::Error> {
    let dir = dir.to_path_buf();
    tokio::task::spawn_blocking(move || save_download(&dir, &name, &bytes))
        .await
        .map_err(io::Error::other)?
}

/// Name of the saved comparison chart, stamped with `date`.
pub fn comparison_chart_name(date: NaiveDate) -> String {
    format!("HotelSat_Comparaison_{}.png", date.format("%Y-%m-%d"))
}

/// Fetch the comparison report of `ids` and save its chart under `dir/charts/`.
pub async fn download_comparison_chart(
    api: &dyn HotelApi,
    ids: &[HotelId],
    dir: &Path,
    date: NaiveDate,
) -> Result<(Comparison, PathBuf), ExportError> {
    let report = api.comparison_report(ids).await?;
    let png = STANDARD.decode(report.comparison_chart.trim())?;
    let path = save_off_runtime(&dir.join(CHARTS_DIR_NAME), comparison_chart_name(date), png).await?;
    log::info!("Saved comparison chart to {}", path.display());
    Ok((report.comparison_data, path))
}

/// A chart image written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedChart {
    pub kind: ChartKind,
    pub path: PathBuf,
    pub size: usize,
}

/// The charts of one hotel, as saved to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCharts {
    pub hotel_name: Option<String>,
    pub charts: Vec<SavedChart>,
}

/// Decode every image of `bundle` and save it under `dir/charts/`.
pub fn save_chart_bundle(
    bundle: &ChartBundle,
    hotel_id: HotelId,
    dir: &Path,
) -> Result<SavedCharts, ExportError> {
    let charts_dir = dir.join(CHARTS_DIR_NAME);
    let mut charts = Vec::new();
    for (kind, encoded) in bundle.images() {
        let png = STANDARD.decode(encoded.trim())?;
        let name = format!("hotel_{}_{}.png", hotel_id, kind.file_stem());
        let path = save_download(&charts_dir, &name, &png)?;
        charts.push(SavedChart {
            kind,
            path,
            size: png.len(),
        });
    }
    Ok(SavedCharts {
        hotel_name: bundle.hotel_name.clone(),
        charts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockHotelApi;
    use crate::api::types::{Charts, ComparisonReport};
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_file_names_carry_iso_date() {
        assert_eq!(
            ExportTarget::Hotel(3).file_name(date()),
            "HotelSat_Export_2026-03-09.xlsx"
        );
        assert_eq!(
            ExportTarget::Global.file_name(date()),
            "HotelSat_Rapport_Global_2026-03-09.xlsx"
        );
    }

    #[tokio::test]
    // A successful export leaves exactly the named file and no temporary file.
    async fn test_download_excel_leaves_no_temporary_file() {
        let dir = tempdir().unwrap();
        let mut api = MockHotelApi::new();
        api.expect_export_hotel_excel()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(b"PK\x03\x04workbook".to_vec()));

        let path = download_excel(&api, ExportTarget::Hotel(3), dir.path(), date())
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("HotelSat_Export_2026-03-09.xlsx"));
        assert_eq!(fs::read(&path).unwrap(), b"PK\x03\x04workbook");
        assert_eq!(dir_entries(dir.path()), vec!["HotelSat_Export_2026-03-09.xlsx"]);
    }

    #[tokio::test]
    // A failed export writes nothing and keeps the server's message.
    async fn test_download_excel_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut api = MockHotelApi::new();
        api.expect_export_global_excel().returning(|| {
            Err(ApiError::Http {
                status: 404,
                message: Some("Aucun hôtel trouvé".to_string()),
            })
        });

        let error = download_excel(&api, ExportTarget::Global, dir.path(), date())
            .await
            .unwrap_err();

        assert_eq!(error.user_message("fallback"), "Aucun hôtel trouvé");
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[tokio::test]
    // The write runs on the blocking pool; its I/O error still comes back as an export error.
    async fn test_download_excel_reports_write_failure() {
        let dir = tempdir().unwrap();
        let not_a_dir = dir.path().join("occupied");
        fs::write(&not_a_dir, b"").unwrap();
        let mut api = MockHotelApi::new();
        api.expect_export_global_excel()
            .returning(|| Ok(b"PK\x03\x04".to_vec()));

        let error = download_excel(&api, ExportTarget::Global, &not_a_dir, date())
            .await
            .unwrap_err();

        assert!(matches!(error, ExportError::Io(_)));
        assert_eq!(dir_entries(dir.path()), vec!["occupied"]);
    }

    #[tokio::test]
    async fn test_comparison_chart_is_decoded_and_saved() {
        let dir = tempdir().unwrap();
        let mut api = MockHotelApi::new();
        api.expect_comparison_report()
            .withf(|ids| ids.to_vec() == vec![1, 2])
            .times(1)
            .returning(|_| {
                Ok(ComparisonReport {
                    comparison_data: Comparison::default(),
                    comparison_chart: STANDARD.encode(b"\x89PNG-comparison"),
                })
            });

        let (_, path) = download_comparison_chart(&api, &[1, 2], dir.path(), date())
            .await
            .unwrap();

        assert_eq!(
            path,
            dir.path()
                .join(CHARTS_DIR_NAME)
                .join("HotelSat_Comparaison_2026-03-09.png")
        );
        assert_eq!(fs::read(path).unwrap(), b"\x89PNG-comparison");
    }

    #[test]
    fn test_save_chart_bundle_decodes_images() {
        let dir = tempdir().unwrap();
        let bundle = ChartBundle {
            charts: Charts {
                categories: Some(STANDARD.encode(b"\x89PNG-categories")),
                distribution: None,
                temporal: Some(STANDARD.encode(b"\x89PNG-temporal")),
            },
            hotel_name: Some("Le Phare".to_string()),
        };

        let saved = save_chart_bundle(&bundle, 5, dir.path()).unwrap();

        assert_eq!(saved.charts.len(), 2);
        assert_eq!(saved.charts[0].kind, ChartKind::Categories);
        assert_eq!(
            fs::read(&saved.charts[1].path).unwrap(),
            b"\x89PNG-temporal"
        );
        assert_eq!(
            dir_entries(&dir.path().join(CHARTS_DIR_NAME)),
            vec!["hotel_5_categories.png", "hotel_5_temporal.png"]
        );
    }

    #[test]
    fn test_save_chart_bundle_rejects_bad_base64() {
        let dir = tempdir().unwrap();
        let bundle = ChartBundle {
            charts: Charts {
                categories: Some("not base64 at all!".to_string()),
                ..Default::default()
            },
            hotel_name: None,
        };
        assert!(matches!(
            save_chart_bundle(&bundle, 5, dir.path()),
            Err(ExportError::Image(_))
        ));
    }
}
