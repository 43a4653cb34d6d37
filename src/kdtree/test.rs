use test_case::test_case;

use crate::distance::EuclideanDistance;
use crate::kdtree::traversal::Node;
use crate::kdtree::{build_index, nearest, KDTree, KDTreeBuilder, KDTreeIndex};
use crate::point::Point;
use crate::GeoNearestError;

fn points() -> Vec<Point> {
    let coords: Vec<[i32; 2]> = vec![
        [54, 1],
        [97, 21],
        [65, 35],
        [33, 54],
        [95, 39],
        [54, 3],
        [53, 54],
        [84, 72],
        [33, 34],
        [43, 15],
        [52, 83],
        [81, 23],
        [1, 61],
        [38, 74],
        [11, 91],
        [24, 56],
        [90, 31],
        [25, 57],
        [46, 61],
        [29, 69],
        [49, 60],
        [4, 98],
        [71, 15],
        [60, 25],
        [38, 84],
        [52, 38],
        [94, 51],
        [13, 25],
        [77, 73],
        [88, 87],
        [6, 27],
        [58, 22],
        [53, 28],
        [27, 91],
        [96, 98],
        [93, 14],
        [22, 93],
        [45, 94],
        [18, 28],
        [35, 15],
        [19, 81],
        [20, 81],
        [67, 53],
        [43, 3],
        [47, 66],
        [48, 34],
        [46, 12],
        [32, 38],
        [43, 12],
        [39, 94],
    ];

    // Shift into valid latitude/longitude ranges
    coords
        .into_iter()
        .map(|[a, b]| Point::at(f64::from(a - 50), f64::from(b - 50)))
        .collect()
}

fn make_index() -> KDTree {
    let points = points();

    let mut builder = KDTreeBuilder::new(points.len());
    for point in points {
        builder.add(point);
    }
    builder.finish()
}

/// Check the partition invariant below `node` and return the number of points visited.
fn check_partition(node: Node<'_, f64, KDTree>) -> usize {
    let axis = node.axis();
    let split = node.point().coord(axis);
    assert_eq!(node.is_leaf(), node.points().len() == 1);
    let mut count = 1;
    if let Some(left) = node.left_child() {
        assert_eq!(left.depth(), node.depth() + 1);
        for point in left.points() {
            assert!(point.coord(axis) <= split, "left of depth {}", node.depth());
        }
        count += check_partition(left);
    }
    if let Some(right) = node.right_child() {
        for point in right.points() {
            assert!(point.coord(axis) >= split, "right of depth {}", node.depth());
        }
        count += check_partition(right);
    }
    count
}

#[test]
fn creates_a_partitioned_index() {
    let tree = make_index();
    let root = tree.root().unwrap();
    assert_eq!(root.points().len(), 50);
    assert_eq!(check_partition(root), 50);
    assert_eq!(tree.height(), 6);
}

#[test]
fn root_splits_on_the_median_latitude() {
    let tree = make_index();
    let root = tree.root().unwrap();
    let mut latitudes: Vec<f64> = points().iter().map(|p| p.latitude()).collect();
    latitudes.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(root.point().latitude(), latitudes[24]);
}

#[test]
fn ids_track_input_positions() {
    let tree = make_index();
    let input = points();
    for (point, &id) in tree.points().iter().zip(tree.ids()) {
        assert_eq!(point, &input[id]);
    }
    assert_eq!(tree.clone().into_points(), input);
}

#[test]
fn partitions_many_duplicates() {
    let points: Vec<Point> = (0..2000)
        .map(|i| Point::at((i % 3) as f64, (i % 5) as f64))
        .collect();
    let tree = build_index(points);
    assert_eq!(check_partition(tree.root().unwrap()), 2000);
}

#[test]
fn partitions_past_the_sampling_threshold() {
    // Large enough that selection recurses into its sampling step.
    let points: Vec<Point> = (0..5000)
        .map(|i| {
            let a = (i * 7919 % 5000) as f64 / 5000.0;
            let b = (i * 104729 % 4999) as f64 / 4999.0;
            Point::at(a * 180.0 - 90.0, b * 360.0 - 180.0)
        })
        .collect();
    let tree = build_index(points);
    assert_eq!(check_partition(tree.root().unwrap()), 5000);
    assert_eq!(tree.height(), 13);
}

#[test]
fn empty_tree() {
    let tree = build_index(Vec::<Point>::new());
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert_eq!(tree.height(), 0);

    let result = tree.neighbors(&Point::at(0.0, 0.0), 3).unwrap();
    assert!(result.is_empty());

    let err = tree.nearest_one(&Point::at(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, GeoNearestError::InvalidArgument(_)));
}

#[test]
fn single_point_is_a_leaf() {
    let tree = build_index(vec![Point::new("HI", "Kalawao", 21.19, -156.95)]);
    let root = tree.root().unwrap();
    assert!(root.is_leaf());
    assert!(root.left_child().is_none());
    assert!(root.right_child().is_none());

    let nearest = tree.nearest_one(&Point::at(0.0, 0.0)).unwrap();
    assert_eq!(nearest.point.county(), "Kalawao");
    assert_eq!(nearest.index, 0);
}

#[test]
fn zero_k_is_rejected() {
    let tree = make_index();
    let err = tree.neighbors(&Point::at(0.0, 0.0), 0).unwrap_err();
    assert!(matches!(err, GeoNearestError::InvalidArgument(_)));
}

#[test]
fn four_point_scenario() {
    let points = vec![
        Point::at(0.0, 0.0),
        Point::at(1.0, 1.0),
        Point::at(5.0, 5.0),
        Point::at(-1.0, -1.0),
    ];
    let tree = build_index(points);
    let result = nearest(&tree, &Point::at(0.0, 0.0), 2).unwrap();

    // (1, 1) and (-1, -1) are equidistant; the earlier input wins.
    let ids: Vec<usize> = result.iter().map(|n| n.index).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(result[0].distance, 0.0);
    assert_eq!(result[1].point, &Point::at(1.0, 1.0));
}

#[test_case(1)]
#[test_case(3)]
#[test_case(10)]
#[test_case(50)]
#[test_case(75)]
fn euclidean_neighbors_are_sorted_and_exact(k: usize) {
    let tree = make_index();
    let input = points();
    let query = Point::at(0.0, 0.0);

    let result = tree
        .neighbors_with_metric(&query, k, &EuclideanDistance)
        .unwrap();
    assert_eq!(result.len(), k.min(input.len()));

    let mut expected: Vec<(f64, usize)> = input
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let dlat = p.latitude() - query.latitude();
            let dlon = p.longitude() - query.longitude();
            ((dlat * dlat + dlon * dlon).sqrt(), i)
        })
        .collect();
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    expected.truncate(k);

    let got: Vec<(f64, usize)> = result.iter().map(|n| (n.distance, n.index)).collect();
    assert_eq!(got, expected);
}

#[test]
fn repeated_queries_are_identical() {
    let tree = make_index();
    let before = tree.clone();
    let query = Point::at(12.5, -7.25);
    let first: Vec<usize> = tree
        .neighbors(&query, 7)
        .unwrap()
        .iter()
        .map(|n| n.index)
        .collect();
    let second: Vec<usize> = tree
        .neighbors(&query, 7)
        .unwrap()
        .iter()
        .map(|n| n.index)
        .collect();
    assert_eq!(first, second);
    assert_eq!(tree, before);
}

#[test]
fn query_by_coord_trait() {
    let tree = make_index();
    // x is longitude, y is latitude
    let coord = Point::at(-17.0, 4.0);
    let by_point = tree.neighbors(&coord, 4).unwrap();
    let by_coord = tree.neighbors_coord(&coord, 4).unwrap();
    assert_eq!(by_point, by_coord);
    // (33, 54) shifted
    assert_eq!(by_point[0].point, &Point::at(-17.0, 4.0));
}

#[test]
fn f32_tree() {
    let points: Vec<Point<f32>> = (0..100)
        .map(|i| Point::at(i as f32 * 0.5 - 25.0, (i * 37 % 100) as f32 - 50.0))
        .collect();
    let tree = build_index(points.clone());
    let query = Point::at(3.3, -4.4);
    let from_tree: Vec<usize> = tree
        .neighbors(&query, 5)
        .unwrap()
        .iter()
        .map(|n| n.index)
        .collect();
    let from_scan: Vec<usize> = crate::nearest_linear(&points, &query, 5)
        .unwrap()
        .iter()
        .map(|n| n.index)
        .collect();
    assert_eq!(from_tree, from_scan);
}

#[cfg(feature = "rayon")]
#[test]
fn batch_matches_sequential() {
    let tree = make_index();
    let queries: Vec<Point> = (0..20)
        .map(|i| Point::at(i as f64 * 4.0 - 40.0, 45.0 - i as f64 * 3.5))
        .collect();
    let batch = tree.neighbors_batch(&queries, 3).unwrap();
    assert_eq!(batch.len(), queries.len());
    for (query, result) in queries.iter().zip(&batch) {
        assert_eq!(result, &tree.neighbors(query, 3).unwrap());
    }
}
