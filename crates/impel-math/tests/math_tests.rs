//! Integration tests for impel-math.

use impel_math::{
    DenseMatrix, Lcg, LcpProblem, LcpSolver, LcpStatus, PivotingLcp, ProjectedGaussSeidel,
};

fn problem<'a>(a: &'a DenseMatrix, b: &'a [f64], joint: &'a [bool]) -> LcpProblem<'a> {
    LcpProblem {
        a,
        b,
        joint,
        time_hint: 0.0,
    }
}

// ─── DenseMatrix Tests ────────────────────────────────────────

#[test]
fn dense_new_is_zeroed() {
    let m = DenseMatrix::new(3, 2);
    assert_eq!(m.rows, 3);
    assert_eq!(m.cols, 2);
    assert!(m.values.iter().all(|&v| v == 0.0));
}

#[test]
fn dense_set_get_roundtrip() {
    let mut m = DenseMatrix::new(2, 2);
    m.set(0, 1, 3.5);
    m.set(1, 0, -1.25);
    assert_eq!(m.get(0, 1), 3.5);
    assert_eq!(m.get(1, 0), -1.25);
    assert_eq!(m.get(0, 0), 0.0);
}

#[test]
fn dense_reset_rezeroes_and_resizes() {
    let mut m = DenseMatrix::new(2, 2);
    m.set(1, 1, 9.0);
    m.reset(3, 3);
    assert_eq!(m.rows, 3);
    assert_eq!(m.cols, 3);
    assert!(m.values.iter().all(|&v| v == 0.0));
}

#[test]
fn dense_mul_vec() {
    let mut m = DenseMatrix::new(2, 2);
    m.set(0, 0, 2.0);
    m.set(0, 1, 1.0);
    m.set(1, 0, 1.0);
    m.set(1, 1, 2.0);
    let mut out = vec![0.0; 2];
    m.mul_vec(&[1.0, -1.0], &mut out);
    assert_eq!(out, vec![1.0, -1.0]);
}

#[test]
fn dense_gather_principal_submatrix() {
    let mut m = DenseMatrix::new(3, 3);
    for r in 0..3 {
        for c in 0..3 {
            m.set(r, c, (r * 3 + c) as f64);
        }
    }
    let mut sub = DenseMatrix::empty();
    m.gather(&[0, 2], &mut sub);
    assert_eq!(sub.rows, 2);
    assert_eq!(sub.get(0, 0), 0.0);
    assert_eq!(sub.get(0, 1), 2.0);
    assert_eq!(sub.get(1, 0), 6.0);
    assert_eq!(sub.get(1, 1), 8.0);
}

#[test]
fn dense_max_asymmetry() {
    let mut m = DenseMatrix::new(2, 2);
    m.set(0, 1, 1.0);
    m.set(1, 0, 1.0);
    assert_eq!(m.max_asymmetry(), 0.0);
    m.set(1, 0, 1.5);
    assert!((m.max_asymmetry() - 0.5).abs() < 1e-15);
}

// ─── Lcg Tests ────────────────────────────────────────────────

#[test]
fn lcg_same_seed_same_sequence() {
    let mut a = Lcg::new(99);
    let mut b = Lcg::new(99);
    for _ in 0..100 {
        assert_eq!(a.next_u32(), b.next_u32());
    }
}

#[test]
fn lcg_reseed_replays() {
    let mut rng = Lcg::new(7);
    let first: Vec<u32> = (0..8).map(|_| rng.next_u32()).collect();
    rng.set_seed(7);
    let second: Vec<u32> = (0..8).map(|_| rng.next_u32()).collect();
    assert_eq!(first, second);
}

#[test]
fn lcg_permutation_is_a_permutation() {
    let mut rng = Lcg::new(1);
    let mut order = Vec::new();
    rng.permutation(20, &mut order);
    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..20).collect::<Vec<_>>());
}

#[test]
fn lcg_permutations_vary_across_calls() {
    let mut rng = Lcg::new(1);
    let mut first = Vec::new();
    let mut second = Vec::new();
    rng.permutation(20, &mut first);
    rng.permutation(20, &mut second);
    assert_ne!(first, second, "consecutive shuffles should differ");
}

// ─── Contract Helper Tests ────────────────────────────────────

#[test]
fn post_velocity_accumulates() {
    let mut a = DenseMatrix::new(2, 2);
    a.set(0, 0, 2.0);
    a.set(0, 1, 1.0);
    a.set(1, 0, 1.0);
    a.set(1, 1, 2.0);
    let b = [-1.0, 0.5];
    let p = problem(&a, &b, &[false, false]);
    assert!((p.post_velocity(&[0.5, 0.0], 0) - 0.0).abs() < 1e-15);
    assert!((p.post_velocity(&[0.5, 0.0], 1) - 1.0).abs() < 1e-15);
}

#[test]
fn check_contract_ignores_idle_rows() {
    // A zero impulse on a one-sided row is acceptable even while the
    // row's post-velocity is negative; the acceptance criterion only
    // inspects joint rows and pushing rows.
    let a = DenseMatrix::new(1, 1);
    let b = [-1.0];
    let p = problem(&a, &b, &[false]);
    assert!(p.check_contract(&[0.0], 1e-4).is_ok());
}

#[test]
fn check_contract_flags_pushing_row() {
    let mut a = DenseMatrix::new(1, 1);
    a.set(0, 0, 1.0);
    let b = [-1.0];
    let p = problem(&a, &b, &[false]);
    // j = 2 leaves a = 1, violating complementarity.
    let err = p.check_contract(&[2.0], 1e-4).unwrap_err();
    assert_eq!(err.0, 0);
    assert!((err.1 - 1.0).abs() < 1e-12);
}

#[test]
fn violation_measures_joint_rows_two_sided() {
    let mut a = DenseMatrix::new(1, 1);
    a.set(0, 0, 1.0);
    let b = [2.0];
    let p = problem(&a, &b, &[true]);
    assert!((p.violation(&[0.0], 0) - 2.0).abs() < 1e-15);
    assert!(p.violation(&[-2.0], 0) < 1e-15);
}

// ─── Solver Tests (both implementations) ──────────────────────

fn solvers() -> Vec<Box<dyn LcpSolver>> {
    vec![
        Box::new(PivotingLcp::new()),
        Box::new(ProjectedGaussSeidel::new()),
    ]
}

#[test]
fn solve_single_approaching_contact() {
    for mut solver in solvers() {
        let mut a = DenseMatrix::new(1, 1);
        a.set(0, 0, 1.0);
        let b = [-2.0];
        let p = problem(&a, &b, &[false]);
        let mut j = vec![0.0];
        let status = solver.solve(&p, &mut j).unwrap();
        assert_eq!(status, LcpStatus::Solved, "{}", solver.name());
        assert!((j[0] - 2.0).abs() < 1e-8, "{}: j = {}", solver.name(), j[0]);
    }
}

#[test]
fn solve_separating_contact_stays_idle() {
    for mut solver in solvers() {
        let mut a = DenseMatrix::new(1, 1);
        a.set(0, 0, 1.0);
        let b = [1.5];
        let p = problem(&a, &b, &[false]);
        let mut j = vec![0.0];
        solver.solve(&p, &mut j).unwrap();
        assert_eq!(j[0], 0.0, "{}", solver.name());
    }
}

#[test]
fn solve_joint_row_allows_negative_impulse() {
    for mut solver in solvers() {
        let mut a = DenseMatrix::new(1, 1);
        a.set(0, 0, 2.0);
        let b = [3.0];
        let p = problem(&a, &b, &[true]);
        let mut j = vec![0.0];
        solver.solve(&p, &mut j).unwrap();
        assert!(
            (j[0] + 1.5).abs() < 1e-8,
            "{}: joint impulse = {}",
            solver.name(),
            j[0]
        );
    }
}

#[test]
fn solve_coupled_pair() {
    for mut solver in solvers() {
        let mut a = DenseMatrix::new(2, 2);
        a.set(0, 0, 2.0);
        a.set(0, 1, 1.0);
        a.set(1, 0, 1.0);
        a.set(1, 1, 2.0);
        let b = [-1.0, -1.0];
        let p = problem(&a, &b, &[false, false]);
        let mut j = vec![0.0; 2];
        solver.solve(&p, &mut j).unwrap();
        for &jv in &j {
            assert!((jv - 1.0 / 3.0).abs() < 1e-8, "{}: j = {jv}", solver.name());
        }
    }
}

#[test]
fn solve_complementary_pair_leaves_one_idle() {
    for mut solver in solvers() {
        let mut a = DenseMatrix::new(2, 2);
        a.set(0, 0, 2.0);
        a.set(0, 1, 1.0);
        a.set(1, 0, 1.0);
        a.set(1, 1, 2.0);
        let b = [-1.0, 2.0];
        let p = problem(&a, &b, &[false, false]);
        let mut j = vec![0.0; 2];
        solver.solve(&p, &mut j).unwrap();
        assert!((j[0] - 0.5).abs() < 1e-8, "{}", solver.name());
        assert_eq!(j[1], 0.0, "{}", solver.name());
        assert!(p.post_velocity(&j, 1) > 0.0);
    }
}

#[test]
fn solve_mixed_joint_and_contact() {
    // One pushing contact coupled to one joint; the joint must end
    // exactly quiet, the contact must stop approaching.
    for mut solver in solvers() {
        let mut a = DenseMatrix::new(2, 2);
        a.set(0, 0, 1.0);
        a.set(0, 1, -1.0);
        a.set(1, 0, -1.0);
        a.set(1, 1, 2.0);
        let b = [-1.0, 0.0];
        let joint = [false, true];
        let p = problem(&a, &b, &joint);
        let mut j = vec![0.0; 2];
        solver.solve(&p, &mut j).unwrap();
        assert!((j[0] - 2.0).abs() < 1e-7, "{}: j0 = {}", solver.name(), j[0]);
        assert!((j[1] - 1.0).abs() < 1e-7, "{}: j1 = {}", solver.name(), j[1]);
        assert!(p.check_contract(&j, 1e-4).is_ok(), "{}", solver.name());
    }
}

#[test]
fn solve_empty_system() {
    for mut solver in solvers() {
        let a = DenseMatrix::new(0, 0);
        let b: [f64; 0] = [];
        let p = problem(&a, &b, &[]);
        let mut j: Vec<f64> = Vec::new();
        assert_eq!(solver.solve(&p, &mut j).unwrap(), LcpStatus::Solved);
    }
}

#[test]
fn solve_rejects_dimension_mismatch() {
    for mut solver in solvers() {
        let a = DenseMatrix::new(2, 2);
        let b = [0.0, 0.0];
        let p = problem(&a, &b, &[false, false]);
        let mut j = vec![0.0; 3];
        assert!(solver.solve(&p, &mut j).is_err(), "{}", solver.name());
    }
}
