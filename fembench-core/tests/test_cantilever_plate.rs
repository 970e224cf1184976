use approx::assert_relative_eq;
use fembench_core::benchmark::{compare, relative_error, run_benchmark};
use fembench_core::export::write_benchmark_table;
use fembench_core::{
    analyze_standard_cases, LoadCase, Material, PlateConfig, PlateModel, SolverConfig, SolverKind,
};

// Unit-square cantilever plate, 2 x 1 quadrilaterals
//
// TEST GOAL
//
// Every solver must reproduce the Gaussian elimination reference on a small
// clamped plate, and the residual of every solution must vanish
//
// MESH
//
// 1.0  fixed 3------4------5 <- load (0, -1000)
//            |      |      |
//            |  0   |  1   |
//            |      |      |
// 0.0  fixed 0------1------2
//           0.0    0.5    1.0
//
// BOUNDARY CONDITIONS
//
// Left edge (nodes 0 and 3) fixed in x and y
// Point load at the top-right node
//
// CONFIGURATION AND PARAMETERS
//
// Young = 210e9, Poisson = 0.3, thickness = 0.005

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unit_plate() -> PlateModel {
    PlateModel::new(&PlateConfig {
        nx: 2,
        ny: 1,
        width: 1.0,
        height: 1.0,
        material: Material::new(210e9, 0.3, 0.005).unwrap(),
    })
    .unwrap()
}

/// Gauss-Seidel stops on the change between sweeps, so the tolerance has to
/// sit well below the displacement scale (~1e-6 m) to reach 1e-6 accuracy.
fn tight_config() -> SolverConfig {
    SolverConfig {
        tolerance: 1e-20,
        max_iterations: 200_000,
        ..SolverConfig::default()
    }
}

#[test]
fn test_cantilever_plate_all_solvers_agree() {
    init_logger();
    let model = unit_plate();

    assert_eq!(model.mesh().n_nodes(), 6);
    assert_eq!(model.n_dofs(), 12);
    assert_eq!(model.global_stiffness().nrows(), 12);
    assert!(model.global_stiffness().is_symmetric(1e-12));
    assert_eq!(model.mesh().left_edge_nodes(), vec![0, 3]);

    let load = LoadCase::PointLoad {
        node: 5,
        fx: 0.0,
        fy: -1000.0,
    };
    let system = model.build_system(&load).unwrap();
    let results = run_benchmark(&system, &tight_config()).unwrap();

    assert_eq!(results.len(), 6);
    assert_eq!(results[0].solver, SolverKind::NaiveGauss);
    let reference = &results[0].solution;

    // The tip deflects downwards, clamped DOFs stay at zero
    assert!(reference[2 * 5 + 1] < 0.0);
    for dof in [0, 1, 6, 7] {
        assert_eq!(reference[dof], 0.0);
    }

    for r in &results {
        assert_eq!(r.solution.len(), 12, "{}", r.solver_name());
        assert!(r.residual < 1e-6, "{}: residual {:e}", r.solver_name(), r.residual);
        let err = relative_error(&r.solution, reference).unwrap();
        assert!(err < 1e-6, "{}: relative error {:e}", r.solver_name(), err);
    }

    let rows = compare(&results).unwrap();
    assert_eq!(rows.iter().filter(|row| row.fastest).count(), 1);
    assert_relative_eq!(rows[0].relative_error, 0.0);
    assert!(rows.iter().all(|row| row.speedup >= 1.0));
}

#[test]
fn test_cantilever_plate_solvers_work_on_copies() {
    init_logger();
    let model = unit_plate();
    let canonical = model.global_stiffness().clone();

    let system = model.build_system(&LoadCase::Angled10kN).unwrap();
    let snapshot = system.clone();
    run_benchmark(&system, &SolverConfig::default()).unwrap();

    assert_eq!(model.global_stiffness(), &canonical);
    assert_eq!(system.stiffness, snapshot.stiffness);
    assert_eq!(system.rhs, snapshot.rhs);
}

#[test]
fn test_standard_load_cases_on_coarse_plate() {
    init_logger();
    let model = PlateModel::new(&PlateConfig {
        nx: 4,
        ny: 2,
        ..PlateConfig::default()
    })
    .unwrap();

    let config = SolverConfig {
        max_iterations: 100_000,
        ..tight_config()
    };
    let reports = analyze_standard_cases(&model, &config).unwrap();
    assert_eq!(reports.len(), LoadCase::STANDARD.len());

    for report in &reports {
        for r in &report.results {
            let err = relative_error(&r.solution, &report.results[0].solution).unwrap();
            assert!(
                err < 1e-6,
                "{} / {}: relative error {:e}",
                report.description,
                r.solver_name(),
                err
            );
        }
        assert_eq!(report.stresses.n_elements(), 8);
        assert!(report.stresses.max_von_mises() > 0.0);

        let mut table = Vec::new();
        write_benchmark_table(&mut table, &report.results).unwrap();
        let text = String::from_utf8(table).unwrap();
        assert_eq!(text.lines().count(), 2 + SolverKind::ALL.len());
    }
}
