use proptest::prelude::*;
use scoped_buffer::alloc;

proptest! {
    // every count in the u16 domain yields a view of exactly that length
    #[test]
    fn alloc_exact_length(count in 0u16..=u16::MAX) {
        let len = alloc::<u8, _, _>(count, |buffer| buffer.len());
        prop_assert_eq!(len, usize::from(count));
    }

    // reported capacity never undershoots the request
    #[test]
    fn capacity_covers_request(count in 0u16..=4096) {
        let (len, capacity) = alloc::<u64, _, _>(count, |buffer| (buffer.len(), buffer.capacity()));
        prop_assert_eq!(len, usize::from(count));
        prop_assert!(capacity >= count);
    }

    // buffers start out vacant on both paths
    #[test]
    fn buffers_start_vacant(count in 0u16..=3000) {
        let clean = alloc::<u32, _, _>(count, |buffer| buffer.iter().all(|&slot| slot == 0));
        prop_assert!(clean);
    }
}
