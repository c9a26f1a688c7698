//! Integration tests: model results exported through the CSV layer

use std::fs;

use labsim::config::EngineConfig;
use labsim::models::{
    DistillationColumn, DistillationParameters, NanoparticleModel, NanoparticleParameters,
};
use labsim::output::{CsvConfig, CsvError, CsvExporter, CsvMetadata, Exporter};
use labsim::physics::{ExperimentModel, Noise};
use tempfile::tempdir;

#[test]
fn test_tray_profile_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("column.csv");

    let column = DistillationColumn::default();
    let parameters = DistillationParameters::new(2.5, 12);
    let result = column.run(&parameters, &mut Noise::disabled());

    let metadata = CsvMetadata::new("Fractional Distillation", column.name())
        .parameter("reflux_ratio", parameters.reflux_ratio)
        .parameter("trays", parameters.tray_count);
    let exporter = CsvExporter::new(CsvConfig::default().precision(3).with_metadata(metadata));

    exporter.export_trace(&result.to_trace(), None, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Simulated Chemistry Experiment Data"));
    assert!(content.contains("# reflux_ratio: 2.5"));

    let data: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(data[0], "Tray,Ethanol (%)");
    assert_eq!(data.len(), 13);
    assert!(data[1].starts_with("1.000,"));
}

#[test]
fn test_spectra_share_wavelength_axis() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spectra.csv");

    let model = NanoparticleModel::new(&mut Noise::disabled());
    let traces: Vec<_> = [25.0, 60.0, 100.0]
        .iter()
        .map(|&t| {
            let outcome = model.run(&NanoparticleParameters::new(0.5, t), &mut Noise::disabled());
            outcome.to_trace().with_name(format!("{} C", t))
        })
        .collect();

    CsvExporter::default()
        .export_traces(&traces, Some(51), &path)
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Wavelength (nm),25 C,60 C,100 C");
    assert_eq!(lines.len(), 52);
    assert!(lines[1].starts_with("400.000000,"));
    assert!(lines[51].starts_with("800.000000,"));
}

#[test]
fn test_config_drives_exporter() {
    let config = EngineConfig::from_str("[export]\ndelimiter = \";\"\nprecision = 2\n").unwrap();
    let exporter = CsvExporter::new(config.csv());

    let column = DistillationColumn::default();
    let result = column.run(&DistillationParameters::default(), &mut Noise::disabled());

    let mut buffer = Vec::new();
    exporter.write_trace(&result.to_trace(), None, &mut buffer).unwrap();
    let content = String::from_utf8(buffer).unwrap();
    assert!(content.lines().next().unwrap().contains(';'));
    assert!(content.lines().nth(1).unwrap().starts_with("1.00;"));
}

#[test]
fn test_empty_result_is_rejected_without_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    let column = DistillationColumn::default();
    let empty = column.simulate(2.0, 0);

    let err = CsvExporter::default()
        .export_trace(&empty.to_trace(), None, &path)
        .unwrap_err();
    assert!(matches!(err, CsvError::EmptyData));
    assert!(!path.exists());
}
