use std::io::Write;

use anyhow::{Context, Result};
use wheelhouse_core::BuildMatrix;

/// Azure Pipelines logging command declaring a stage output variable.
fn set_variable(out: &mut impl Write, name: &str, value: &str) -> Result<()> {
    writeln!(
        out,
        "##vso[task.setvariable variable={name};isOutput=true]{value}"
    )
    .with_context(|| format!("failed to emit pipeline variable {name}"))
}

/// Print the matrix as pipeline output variables. The consumer cannot tell
/// an empty matrix from an absent one, so `matrix_has_jobs` is only set
/// when there is at least one job; downstream stages key their conditions
/// off that flag.
pub fn emit_variables(out: &mut impl Write, matrix: &BuildMatrix) -> Result<()> {
    tracing::info!(jobs = matrix.jobs().len(), "emitting build matrix");
    set_variable(out, "matrix", &matrix.to_json()?)?;
    if matrix.has_jobs() {
        set_variable(out, "matrix_has_jobs", "true")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use wheelhouse_core::build_matrix;
    use wheelhouse_domain::BuildSpec;

    use super::*;

    #[test]
    fn empty_matrix_omits_the_has_jobs_flag() {
        let matrix = build_matrix(&[]).expect("matrix");
        let mut out = Vec::new();
        emit_variables(&mut out, &matrix).expect("emit");

        let output = String::from_utf8(out).expect("utf8");
        assert_eq!(
            output,
            "##vso[task.setvariable variable=matrix;isOutput=true]{}\n"
        );
    }

    #[test]
    fn jobs_set_both_variables() {
        let missing = [BuildSpec {
            package: "cryptography".to_string(),
            version: "36.0.1".to_string(),
            platform_instance: "freebsd/13.0".to_string(),
            platform_arch: "x86_64".to_string(),
            python_tag: "cp38".parse().expect("valid tag"),
            abi_tag: "abi3".to_string(),
            platform_tag: "freebsd/13.0".to_string(),
            sdist_url: "https://files.example/cryptography-36.0.1.tar.gz".to_string(),
            constraints: String::new(),
        }];
        let matrix = build_matrix(&missing).expect("matrix");
        let mut out = Vec::new();
        emit_variables(&mut out, &matrix).expect("emit");

        let output = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("##vso[task.setvariable variable=matrix;isOutput=true]{"));
        assert!(lines[0].contains("wheel_freebsd/13.0"));
        assert_eq!(
            lines[1],
            "##vso[task.setvariable variable=matrix_has_jobs;isOutput=true]true"
        );

        let payload = lines[0]
            .split_once(']')
            .map(|(_, json)| json)
            .expect("payload");
        let value: serde_json::Value = serde_json::from_str(payload).expect("matrix json");
        assert_eq!(value["wheel_freebsd/13.0"]["python"], "3.8");
    }
}
