use fissile_model::{
    collision_track_system, k_system, Error, Model, Result, RunReport, SphereConfig,
    TransportEngine, MODEL_FILE,
};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Engine double that records where it was launched and what it found there
#[derive(Default)]
struct RecordingEngine {
    seen: RefCell<Vec<(PathBuf, String)>>,
}

impl TransportEngine for RecordingEngine {
    fn run(&self, workdir: &Path) -> Result<RunReport> {
        let document = fs::read_to_string(workdir.join(MODEL_FILE))?;
        self.seen.borrow_mut().push((workdir.to_path_buf(), document));
        Ok(RunReport {
            workdir: workdir.to_path_buf(),
            elapsed: Duration::ZERO,
            stdout: "k-effective (Combined) = 1.00000 +/- 0.00100".to_string(),
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}

struct FailingEngine;

impl TransportEngine for FailingEngine {
    fn run(&self, _workdir: &Path) -> Result<RunReport> {
        Err(Error::Engine("no cross sections".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[test]
fn k_system_exports_eigenvalue_model() {
    let dir = tempfile::tempdir().unwrap();
    let model = k_system(&SphereConfig::default()).unwrap();
    let path = model.export_to_model_xml(dir.path().join("k_system")).unwrap();

    assert_eq!(path.file_name().unwrap(), MODEL_FILE);
    let xml = fs::read_to_string(&path).unwrap();
    assert!(xml.contains(r#"<material id="1" name="U235-H2O mixture">"#));
    assert!(xml.contains(r#"<density units="g/cm3" value="1"/>"#));
    assert!(xml.contains(r#"<nuclide name="U235" ao="0.00113"/>"#));
    assert!(xml.contains(r#"<sab name="c_H_in_H2O"/>"#));
    assert!(xml.contains(r#"<surface id="2" boundary="vacuum" coeffs="0 0 0 120" type="sphere"/>"#));
    assert!(xml.contains("<run_mode>eigenvalue</run_mode>"));
    assert!(xml.contains("<particles>100000</particles>"));
    assert!(xml.contains("<inactive>30</inactive>"));
    assert!(xml.contains("<path>../data/k_system</path>"));
}

#[test]
fn collision_track_exports_detectors() {
    let dir = tempfile::tempdir().unwrap();
    let model = collision_track_system(&SphereConfig::default()).unwrap();
    let xml = fs::read_to_string(model.export_to_model_xml(dir.path()).unwrap()).unwrap();

    assert!(xml.contains(r#"<surface id="2" coeffs="0 30 0 5" type="sphere"/>"#));
    assert!(xml.contains(r#"<surface id="3" coeffs="0 -30 0 5" type="sphere"/>"#));
    assert!(xml.contains(r#"region="1 2 3 -4""#));
    assert!(xml.contains(r#"<nuclide name="B10" ao="1"/>"#));
    assert!(xml.contains("<run_mode>fixed source</run_mode>"));
    assert!(xml.contains("<reactions>absorption</reactions>"));
    assert!(xml.contains("<cell_ids>2 3</cell_ids>"));
    assert!(xml.contains("<create_delayed_neutrons>false</create_delayed_neutrons>"));
}

#[test]
fn run_exports_before_launching() {
    let dir = tempfile::tempdir().unwrap();
    let engine = RecordingEngine::default();
    let model = k_system(&SphereConfig::default()).unwrap();

    let report = model.run(&engine, dir.path()).unwrap();
    assert!(report.stdout.contains("k-effective"));

    let seen = engine.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, dir.path());
    assert_eq!(seen[0].1, model.to_xml().unwrap());
}

#[test]
fn engine_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let model = k_system(&SphereConfig::default()).unwrap();
    let result = model.run(&FailingEngine, dir.path());
    assert!(matches!(result, Err(Error::Engine(_))));
    // the model is still on disk for inspection
    assert!(dir.path().join(MODEL_FILE).is_file());
}

#[test]
fn engine_trait_objects() {
    let dir = tempfile::tempdir().unwrap();
    let engines: Vec<Box<dyn TransportEngine>> =
        vec![Box::new(RecordingEngine::default()), Box::new(FailingEngine)];
    let model = collision_track_system(&SphereConfig::default()).unwrap();

    let outcomes: Vec<bool> = engines
        .iter()
        .map(|engine| model.run(engine.as_ref(), dir.path()).is_ok())
        .collect();
    assert_eq!(outcomes, vec![true, false]);
}

#[test]
fn custom_config_changes_model() {
    let mut config = SphereConfig::default();
    config.geometry.fuel_radius = 30.0;
    config.criticality.particles = 2_000;
    let model = k_system(&config).unwrap();

    let xml = model.to_xml().unwrap();
    assert!(xml.contains(r#"coeffs="0 0 0 30""#));
    assert!(xml.contains(r#"coeffs="0 0 0 130""#));
    assert!(xml.contains("<particles>2000</particles>"));

    let restored = Model::from_json(&model.to_json().unwrap()).unwrap();
    assert_eq!(restored, model);
}
