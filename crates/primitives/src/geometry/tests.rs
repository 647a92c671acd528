use super::{Axis, Bounds};

#[test]
fn new_normalizes_corners() {
	let b = Bounds::new([2.0, -1.0, 5.0], [0.0, 3.0, 1.0]);
	assert_eq!(b.min, [0.0, -1.0, 1.0]);
	assert_eq!(b.max, [2.0, 3.0, 5.0]);
}

#[test]
fn axis_sizes() {
	let b = Bounds::from_size([2.0, 4.0, 9.0]);
	assert_eq!(b.axis_size(Axis::X), 2.0);
	assert_eq!(b.axis_size(Axis::Y), 4.0);
	assert_eq!(b.axis_size(Axis::Z), 9.0);
	assert_eq!(b.min_axis_size(), 2.0);
	assert_eq!(b.max_axis_size(), 9.0);
	assert_eq!(b.average_axis_size(), 5.0);
}

#[test]
fn from_size_ignores_sign() {
	let b = Bounds::from_size([-2.0, 2.0, 0.0]);
	assert_eq!(b.size(), [2.0, 2.0, 0.0]);
}

#[test]
fn non_finite_bounds_are_flagged() {
	let b = Bounds {
		min: [0.0, 0.0, f64::NAN],
		max: [1.0, 1.0, 1.0],
	};
	assert!(!b.is_finite());
	assert!(Bounds::from_size([1.0, 1.0, 1.0]).is_finite());
}
