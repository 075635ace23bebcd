use f90defaults::{FortranValue, NamelistTemplate, WriteOptions};
use tempfile::TempDir;

const INPUT_NML: &str = "\
&filter_nml
   single_file_in               = .false.,
   input_state_files            = ''
   input_state_file_list        = 'filter_input_list.txt'
   ens_size                     = 80,
   num_output_state_members     = 80,
   output_mean                  = .true.
   inf_flavor                   = 0,                       0,
   inf_initial                  = 1.0,                     1.0,
   inf_sd_lower_bound           = 0.0,                     0.0
   stages_to_write              = 'preassim', 'output'
/

&obs_kind_nml
   assimilate_these_obs_types = 'RADIOSONDE_TEMPERATURE',
                                'RADIOSONDE_U_WIND_COMPONENT',
                                'RADIOSONDE_V_WIND_COMPONENT'
   evaluate_these_obs_types   = ''
/
";

fn template() -> NamelistTemplate {
    f90defaults::reads(INPUT_NML).unwrap()
}

#[test]
fn test_namelist_text_round_trip() {
    let original = template();
    let rewritten = f90defaults::reads(&f90defaults::writes(&original)).unwrap();
    assert_eq!(rewritten, original);
}

#[test]
fn test_yaml_template_round_trip() {
    let original = template();
    let yaml = f90defaults::to_yaml(&original).unwrap();

    assert!(yaml.contains("  ens_size:\n    values: 80\n"));
    assert!(yaml.contains("  input_state_files:\n    values: ''\n"));
    assert_eq!(f90defaults::from_yaml(&yaml).unwrap(), original);
}

#[test]
fn test_json_template_round_trip() {
    let original = template();
    let json = f90defaults::to_json(&original).unwrap();
    assert_eq!(f90defaults::from_json(&json).unwrap(), original);
}

#[test]
fn test_reduce_and_write_case() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.nml");

    let reduced = f90defaults::reduce(&template(), |name| match name {
        "ens_size" | "num_output_state_members" => Some(FortranValue::Integer(40)),
        "inf_flavor" => Some(FortranValue::from(vec![2i64, 0])),
        "evaluate_these_obs_types" => Some(FortranValue::character("RADIOSONDE_SURFACE_PRESSURE")),
        _ => None,
    });
    f90defaults::write(&reduced, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("&filter_nml\n  single_file_in = .false.\n"));
    assert!(written.contains("  ens_size = 40\n"));
    assert!(written.contains("  inf_flavor = 2, 0\n"));
    assert!(written.contains("  inf_initial = 1.0, 1.0\n"));
    assert!(written.contains("  stages_to_write = 'preassim', 'output'\n"));
    assert!(written.contains("  evaluate_these_obs_types = 'RADIOSONDE_SURFACE_PRESSURE'\n"));
    assert!(written.ends_with("/\n\n"));

    let reread = f90defaults::read(&path).unwrap();
    assert_eq!(reread, reduced);
}

#[test]
fn test_write_does_not_overwrite_without_force() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.nml");
    std::fs::write(&path, "keep me").unwrap();

    let err = f90defaults::write(&template(), &path).unwrap_err();
    assert!(matches!(err, f90defaults::F90DefaultsError::FileAlreadyExists(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

    let options = WriteOptions {
        force: true,
        ..WriteOptions::default()
    };
    f90defaults::write_with_options(&template(), &path, &options).unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().starts_with("&filter_nml"));
}

#[test]
fn test_read_reports_position_of_bad_input() {
    let err = f90defaults::reads("&filter_nml\n  ens_size = 80\n  cutoff = = 0.2\n/\n").unwrap_err();
    match err {
        f90defaults::F90DefaultsError::Read { line, .. } => assert_eq!(line, 3),
        other => panic!("expected Read error, got {:?}", other),
    }
}
