use std::collections::{BTreeMap, BTreeSet};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::debug;
use wheelhouse_domain::{BuildSpec, PythonVersion};

/// Per-package payload handed to the build job, serialized into `job_data`.
#[derive(Clone, Debug, Serialize)]
pub struct PackageEntry {
    pub name: String,
    pub version: String,
    pub python: String,
    pub python_version: String,
    pub python_tag: String,
    pub abi: String,
    pub sdist_dir: String,
    pub sdist_url: String,
    pub expected_output_filename: String,
    pub constraints: String,
}

impl PackageEntry {
    fn from_spec(spec: &BuildSpec) -> Self {
        Self {
            name: spec.package.clone(),
            version: spec.version.clone(),
            python: spec.python_tag.interpreter(),
            python_version: spec.python_tag.version().to_string(),
            python_tag: spec.python_tag.as_str().to_string(),
            abi: spec.abi_tag.clone(),
            sdist_dir: spec.sdist_dir(),
            sdist_url: spec.sdist_url.clone(),
            expected_output_filename: spec.filename(),
            constraints: spec.constraints.clone(),
        }
    }
}

/// One pipeline job: every missing wheel for a single platform tag.
#[derive(Debug)]
struct Job {
    instance: String,
    arch: String,
    packages: Vec<PackageEntry>,
    python_versions: BTreeSet<PythonVersion>,
}

#[derive(Serialize)]
struct JobData<'a> {
    instance: &'a str,
    arch: &'a str,
    packages: &'a [PackageEntry],
}

/// Transport shape of one job. The pipeline consumer only accepts shallow
/// string-valued maps, so the structured payload travels JSON-encoded in
/// `job_data`.
#[derive(Clone, Debug, Serialize)]
pub struct JobMatrixEntry {
    pub instance: String,
    pub arch: String,
    /// Interpreter version the instance is provisioned with.
    pub python: String,
    /// Additional interpreter versions to install, ascending,
    /// space-separated.
    pub pythons: String,
    pub job_data: String,
}

/// Job matrix keyed by `wheel_<platform_tag>`, ordered by job name.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct BuildMatrix {
    jobs: BTreeMap<String, JobMatrixEntry>,
}

impl BuildMatrix {
    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    pub fn jobs(&self) -> &BTreeMap<String, JobMatrixEntry> {
        &self.jobs
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.jobs).context("failed to encode build matrix")
    }
}

/// Group missing specs by platform tag into jobs, then flatten each job to
/// its transport shape.
pub fn build_matrix(missing: &[BuildSpec]) -> Result<BuildMatrix> {
    let mut jobs: BTreeMap<String, Job> = BTreeMap::new();
    for spec in missing {
        let name = format!("wheel_{}", spec.platform_tag);
        let job = jobs.entry(name).or_insert_with(|| Job {
            instance: spec.platform_instance.clone(),
            arch: spec.platform_arch.clone(),
            packages: Vec::new(),
            python_versions: BTreeSet::new(),
        });
        job.packages.push(PackageEntry::from_spec(spec));
        job.python_versions.insert(spec.python_tag.version());
    }

    let mut matrix = BTreeMap::new();
    for (name, job) in jobs {
        let entry = flatten(&name, &job)?;
        debug!(job = %name, data = %entry.job_data, "flattened job");
        matrix.insert(name, entry);
    }
    Ok(BuildMatrix { jobs: matrix })
}

/// Pure serialization step, kept separate from job accumulation: pick the
/// smallest interpreter version as primary, join the rest ascending, and
/// encode the structured payload as a string.
fn flatten(name: &str, job: &Job) -> Result<JobMatrixEntry> {
    let mut versions = job.python_versions.iter().copied();
    let primary = versions
        .next()
        .ok_or_else(|| anyhow!("job {name} grouped zero build specs"))?;
    let pythons = versions
        .map(|version| version.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let job_data = serde_json::to_string(&JobData {
        instance: &job.instance,
        arch: &job.arch,
        packages: &job.packages,
    })
    .with_context(|| format!("failed to encode job data for {name}"))?;
    Ok(JobMatrixEntry {
        instance: job.instance.clone(),
        arch: job.arch.clone(),
        python: primary.to_string(),
        pythons,
        job_data,
    })
}
