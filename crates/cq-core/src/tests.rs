//! Unit tests for cq-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DriverId, EdgeId, NodeId};

    #[test]
    fn from_index_checks_the_id_space() {
        assert_eq!(DriverId::from_index(42), Some(DriverId(42)));
        assert_eq!(DriverId(42).index(), 42);
        assert_eq!(NodeId::from_index(u32::MAX as usize), Some(NodeId(u32::MAX)));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(NodeId::from_index(u32::MAX as usize + 1), None);
    }

    #[test]
    fn unreached_edge_marker_is_out_of_range() {
        assert_eq!(EdgeId::NONE.0, u32::MAX);
        assert!(EdgeId(0) < EdgeId::NONE);
    }

    #[test]
    fn display() {
        assert_eq!(DriverId(7).to_string(), "DriverId(7)");
        assert_eq!(NodeId(3).to_string(), "NodeId(3)");
    }
}

#[cfg(test)]
mod class {
    use crate::DriverClass;

    #[test]
    fn dense_indices_are_distinct() {
        assert_eq!(DriverClass::Disciplined.index(), 0);
        assert_eq!(DriverClass::Erratic.index(), 1);
        assert_eq!(DriverClass::ALL.len(), 2);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(DriverClass::Erratic.to_string(), "erratic");
        assert!(DriverClass::Erratic.is_erratic());
        assert!(!DriverClass::Disciplined.is_erratic());
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn first_pass_is_tick_one() {
        assert_eq!(Tick::ZERO.next(), Tick(1));
        assert_eq!(Tick::default(), Tick::ZERO);
        assert_eq!(Tick(4).to_string(), "T4");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let xs: Vec<u64> = (0..16).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..16).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(1);
        assert!((0..1_000).all(|_| !rng.gen_bool(0.0)));
        assert!((0..1_000).all(|_| rng.gen_bool(1.0)));
    }

    #[test]
    fn gen_bool_consumes_one_draw_regardless_of_p() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        a.gen_bool(1.0);
        b.gen_bool(0.3);
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(5);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        assert_ne!(c0.random::<u64>(), c1.random::<u64>());
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }
}

#[cfg(test)]
mod error {
    use crate::{CoreError, check_probability};

    #[test]
    fn accepts_closed_unit_interval() {
        assert_eq!(check_probability("p", 0.0), Ok(0.0));
        assert_eq!(check_probability("p", 1.0), Ok(1.0));
        assert_eq!(check_probability("p", 0.25), Ok(0.25));
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        for bad in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            let err = check_probability("erratic_fraction", bad).unwrap_err();
            assert!(matches!(err, CoreError::InvalidParameter { name: "erratic_fraction", .. }));
        }
    }
}
