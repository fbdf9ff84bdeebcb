use skylio::{Config, HyperBox, HyperPlane, SkylineIndex, SkylioError};

fn flat(object_id: u32, instance_id: u64, weight: u32, z: f64) -> HyperPlane {
    HyperPlane::new(object_id, instance_id, weight, vec![0.0], z)
}

/// Test 1: dimensionality disagreements are rejected before any tree exists
#[test]
fn test_dimension_mismatches_fail_fast() {
    let config = Config::default();

    let space_3d = HyperBox::cube(3, 0.0, 1.0);
    assert!(matches!(
        SkylineIndex::build(Vec::new(), space_3d, &config),
        Err(SkylioError::DimensionMismatch { expected: 2, .. })
    ));

    let space = HyperBox::cube(2, 0.0, 1.0);
    let plane_3d = HyperPlane::new(0, 0, 1, vec![0.1, 0.2], 0.5);
    assert!(matches!(
        SkylineIndex::build(vec![plane_3d], space, &config),
        Err(SkylioError::DimensionMismatch { .. })
    ));
}

/// Test 2: malformed planes are rejected
#[test]
fn test_malformed_planes_fail_fast() {
    let space = HyperBox::cube(2, 0.0, 1.0);
    let config = Config::default();

    let zero_weight = flat(0, 0, 0, 0.5);
    assert!(matches!(
        SkylineIndex::build(vec![zero_weight], space.clone(), &config),
        Err(SkylioError::InvalidInput(_))
    ));

    let nan_offset = flat(0, 0, 1, f64::NAN);
    assert!(SkylineIndex::build(vec![nan_offset], space.clone(), &config).is_err());

    let inf_slope = HyperPlane::new(0, 0, 1, vec![f64::INFINITY], 0.5);
    assert!(SkylineIndex::build(vec![inf_slope], space, &config).is_err());
}

/// Test 3: empty or inverted spaces are rejected
#[test]
fn test_degenerate_space_fails_fast() {
    let config = Config::default();

    let flat_space = HyperBox::new(vec![0.0, 0.0], vec![1.0, 0.0]);
    assert!(matches!(
        SkylineIndex::build(Vec::new(), flat_space, &config),
        Err(SkylioError::EmptySpace(_))
    ));

    let inverted = HyperBox::new(vec![0.0, 1.0], vec![1.0, 0.0]);
    assert!(SkylineIndex::build(Vec::new(), inverted, &config).is_err());
}

/// Test 4: coincident planes cannot be separated by subdivision; the
/// depth clamp turns them into an oversized leaf instead of recursing
/// without bound
#[test]
fn test_coincident_planes_hit_depth_clamp() {
    let space = HyperBox::cube(2, 0.0, 1.0);
    let planes = vec![
        flat(0, 0, 1, 0.5),
        flat(1, 1, 1, 0.5),
        flat(2, 2, 1, 0.5),
    ];
    let config = Config::default().with_leaf_capacity(1).with_max_depth(6);
    let index = SkylineIndex::build(planes, space.clone(), &config).expect("build failed");

    // coincident planes never strictly dominate one another
    let results = index.query(&space).expect("query failed");
    for instance in 0..3u64 {
        assert_eq!(results[&instance], 1.0);
    }
}

/// Test 5: a query region completely outside every plane still answers
#[test]
fn test_region_above_all_planes() {
    let space = HyperBox::cube(2, 0.0, 1.0);
    let planes = vec![flat(0, 0, 1, 0.2), flat(1, 1, 1, 0.3)];
    let index =
        SkylineIndex::build(planes, space.clone(), &Config::default()).expect("build failed");

    let top = HyperBox::new(vec![0.0, 0.8], vec![1.0, 1.0]);
    let results = index.query(&top).expect("query failed");
    assert_eq!(results[&0], 0.0);
    assert_eq!(results[&1], 0.0);
}

/// Test 6: degenerate (zero-width) query regions are legal
#[test]
fn test_point_query_region() {
    let space = HyperBox::cube(2, 0.0, 1.0);
    let planes = vec![flat(0, 0, 1, 0.3), flat(1, 1, 1, 0.6)];
    let index =
        SkylineIndex::build(planes, space.clone(), &Config::default()).expect("build failed");

    let sliver = HyperBox::new(vec![0.4, 0.0], vec![0.4, 1.0]);
    let results = index.query(&sliver).expect("query failed");
    assert_eq!(results[&0], 0.0);
    assert_eq!(results[&1], 1.0);
}

/// Test 7: query regions are validated like the space
#[test]
fn test_query_region_validation() {
    let space = HyperBox::cube(2, 0.0, 1.0);
    let index =
        SkylineIndex::build(Vec::new(), space, &Config::default()).expect("build failed");

    assert!(index.query(&HyperBox::cube(3, 0.0, 1.0)).is_err());

    let inverted = HyperBox::new(vec![0.0, 1.0], vec![1.0, 0.0]);
    assert!(index.query(&inverted).is_err());

    let nan = HyperBox::new(vec![0.0, 0.0], vec![f64::NAN, 1.0]);
    assert!(index.query(&nan).is_err());
}

/// Test 8: planes outside the index space are carried but score zero
#[test]
fn test_planes_outside_space() {
    let space = HyperBox::cube(2, 0.0, 1.0);
    let below = flat(0, 0, 1, -2.0);
    let inside = flat(1, 1, 1, 0.5);
    let index = SkylineIndex::build(vec![below, inside], space.clone(), &Config::default())
        .expect("build failed");

    let results = index.query(&space).expect("query failed");
    assert_eq!(results.len(), 2);
    assert_eq!(results[&0], 0.0);
    assert_eq!(results[&1], 1.0);
}

/// Test 9: three-dimensional dual spaces build and answer
#[test]
fn test_three_dimensional_space() {
    let space = HyperBox::cube(3, 0.0, 1.0);
    let config = Config::default().with_dims(3).with_leaf_capacity(2);
    let planes = vec![
        HyperPlane::new(0, 0, 1, vec![0.0, 0.0], 0.3),
        HyperPlane::new(1, 1, 1, vec![0.0, 0.0], 0.6),
        HyperPlane::new(2, 2, 2, vec![0.05, -0.05], 0.45),
    ];
    let index = SkylineIndex::build(planes, space.clone(), &config).expect("build failed");

    let stats = index.stats();
    assert_eq!(stats.levels, 3);

    let results = index.query(&space).expect("query failed");
    assert_eq!(results.len(), 3);
    assert_eq!(results[&0], 0.0);
    assert_eq!(results[&1], 1.0);
    for probability in results.values() {
        assert!((0.0..=1.0).contains(probability));
    }
}

/// Test 10: larger weights than ordinals ever folded keep the build legal
#[test]
fn test_sparse_ordinals_build() {
    let space = HyperBox::cube(2, 0.0, 1.0);
    // one object whose only indexed instance is its fifth ordinal
    let planes = vec![flat(0, 0, 5, 0.9), flat(1, 1, 1, 0.2)];
    let config = Config::default().with_leaf_capacity(1);
    let index = SkylineIndex::build(planes, space.clone(), &config).expect("build failed");

    let results = index.query(&space).expect("query failed");
    // the dominated instance survives unless the fifth ordinal is real
    assert!((results[&1] - 0.8).abs() < 1e-12);
}
