// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use rstest::rstest;

use empirical::estimators::entropy::DEFAULT_K;
use empirical::{EmpiricalError, EstimatorKind};

#[rstest]
#[case("kde", EstimatorKind::Kde)]
#[case("Kernel", EstimatorKind::Kde)]
#[case(" plug-in ", EstimatorKind::Kde)]
#[case("plugin", EstimatorKind::Kde)]
#[case("knn", EstimatorKind::Knn(DEFAULT_K))]
#[case("KL", EstimatorKind::Knn(DEFAULT_K))]
#[case("kozachenko-leonenko", EstimatorKind::Knn(DEFAULT_K))]
#[case("knn(7)", EstimatorKind::Knn(7))]
#[case("knn:2", EstimatorKind::Knn(2))]
#[case("kozachenko_leonenko( 3 )", EstimatorKind::Knn(3))]
fn parses_aliases(#[case] name: &str, #[case] expected: EstimatorKind) {
    assert_eq!(name.parse::<EstimatorKind>().unwrap(), expected);
}

#[rstest]
#[case("histogram")]
#[case("knn(0)")]
#[case("knn(x)")]
#[case("kde(3)")]
#[case("")]
fn rejects_unknown_or_malformed(#[case] name: &str) {
    assert!(matches!(
        name.parse::<EstimatorKind>(),
        Err(EmpiricalError::InvalidParameter { .. })
    ));
}

#[test]
fn display_round_trips_through_parse() {
    for kind in [EstimatorKind::Kde, EstimatorKind::Knn(5)] {
        assert_eq!(kind.to_string().parse::<EstimatorKind>().unwrap(), kind);
    }
    assert_eq!(EstimatorKind::default(), EstimatorKind::Kde);
}
