use scoped_buffer::{alloc, register, Bin4096, Element, Inline};

#[derive(Clone, Copy)]
struct Sample(u16);

impl Element for Sample {
    const STACKABLE: bool = true;

    fn vacant() -> Self {
        Sample(0)
    }
}

// a registered custom shape serves its exact capacity from the stack
#[test]
fn custom_shape() {
    register::<Sample, Inline<Sample, 24>>();
    alloc::<Sample, _, _>(24, |buffer| {
        assert!(buffer.in_stack());
        assert_eq!(buffer.capacity(), 24);
        assert_eq!(buffer.len(), 24);
        assert!(buffer.iter().all(|sample| sample.0 == 0));
    });
}

// registering a bigger pure family extends the stack-resolvable space
#[test]
fn register_extends_space() {
    register::<Sample, Bin4096<Sample>>();
    alloc::<Sample, _, _>(5000, |buffer| {
        assert!(buffer.in_stack());
        assert_eq!(buffer.capacity(), 5000);
    });
    alloc::<Sample, _, _>(9000, |buffer| {
        assert_eq!(buffer.len(), 9000);
        assert!(!buffer.in_stack());
    });
}

// registering twice behaves like registering once
#[test]
fn idempotent_registration() {
    register::<Sample, Inline<Sample, 24>>();
    register::<Sample, Inline<Sample, 24>>();
    alloc::<Sample, _, _>(24, |buffer| {
        assert!(buffer.in_stack());
        assert_eq!(buffer.capacity(), 24);
    });
}
