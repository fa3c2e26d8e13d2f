//! Per-package status classification.

use std::any::Any;
use std::thread;

use super::record::{PackageStatusRecord, StatusReport};
use crate::error::{GmError, Result};
use crate::registry::{InstalledVersions, LatestVersion, PackageManager, Probe};

/// Default number of concurrent latest-version lookups.
pub const DEFAULT_JOBS: usize = 4;

/// Classify one package from its installed version and latest lookup.
pub fn classify_one(name: &str, installed: Option<&str>, latest: LatestVersion) -> PackageStatusRecord {
    let installed = installed.map(String::from);
    match latest {
        LatestVersion::Failed(message) => PackageStatusRecord::failed(name, installed, message),
        LatestVersion::Found(version) => PackageStatusRecord::classify(name, installed, Some(version)),
        LatestVersion::Missing => PackageStatusRecord::classify(name, installed, None),
    }
}

/// Classify every tracked package.
///
/// `latest` is called once per name, spread over at most `jobs` worker
/// threads. Records come back in the order of `names`. A panicking lookup
/// fails the whole run.
pub fn classify<F>(
    names: &[String],
    installed: &InstalledVersions,
    latest: F,
    jobs: usize,
) -> Result<StatusReport>
where
    F: Fn(&str) -> LatestVersion + Sync,
{
    if names.is_empty() {
        return Ok(StatusReport::new(Vec::new()));
    }

    let workers = jobs.clamp(1, names.len());
    let chunk_size = names.len().div_ceil(workers);
    let latest = &latest;

    let outcomes: Vec<thread::Result<Vec<PackageStatusRecord>>> = thread::scope(|scope| {
        let handles: Vec<_> = names
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|name| {
                            let lookup = latest(name.as_str());
                            classify_one(name, installed.get(name).map(String::as_str), lookup)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles.into_iter().map(|handle| handle.join()).collect()
    });

    let mut records = Vec::with_capacity(names.len());
    for outcome in outcomes {
        match outcome {
            Ok(chunk) => records.extend(chunk),
            Err(payload) => {
                return Err(GmError::CollectionFailed {
                    message: panic_message(payload.as_ref()),
                })
            }
        }
    }

    Ok(StatusReport::new(records))
}

/// Run a full collection pass against `manager`.
///
/// An unavailable installed-package listing is treated as "nothing
/// installed"; lookup failures are recorded per package.
pub fn collect(names: &[String], manager: &dyn PackageManager, jobs: usize) -> Result<StatusReport> {
    let installed = match manager.list_installed() {
        Probe::Available(installed) => installed,
        Probe::Unavailable(reason) => {
            tracing::warn!(
                "Could not list installed {} packages: {}",
                manager.name(),
                reason
            );
            InstalledVersions::new()
        }
    };

    tracing::debug!(
        "Checking {} packages with {} jobs",
        names.len(),
        jobs.max(1)
    );
    classify(names, &installed, |name| manager.latest_version(name), jobs)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error while collecting status".to_string()
    }
}
