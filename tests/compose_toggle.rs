use scoped_buffer::{alloc, register, set_auto_compose, Element, Inline};

#[derive(Clone, Copy)]
struct Probe(u8);

impl Element for Probe {
    const STACKABLE: bool = true;

    fn vacant() -> Self {
        Probe(0)
    }
}

// with composition off, capacities needing a new composite fall back to the
// minimal oversized binary shape; registered space still serves exact hits
#[test]
fn disabled_composition_falls_back() {
    register::<Probe, Inline<Probe, 2048>>();
    set_auto_compose(false);
    alloc::<Probe, _, _>(3000, |buffer| {
        assert_eq!(buffer.len(), 3000);
        assert!(buffer.in_stack());
        assert_eq!(buffer.capacity(), 4096);
        assert!(buffer.iter().all(|probe| probe.0 == 0));
    });
    alloc::<Probe, _, _>(700, |buffer| {
        assert!(buffer.in_stack());
        assert_eq!(buffer.capacity(), 700);
    });
    alloc::<Probe, _, _>(40_000, |buffer| {
        assert_eq!(buffer.len(), 40_000);
        assert!(!buffer.in_stack());
    });
    set_auto_compose(true);
    alloc::<Probe, _, _>(3000, |buffer| {
        assert!(buffer.in_stack());
        assert_eq!(buffer.capacity(), 3000);
    });
}
