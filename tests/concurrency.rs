use std::thread;

use scoped_buffer::{alloc, register, Bin1, Bin2, Composite, Element};

#[derive(Clone, Copy)]
struct Shared(u64);

impl Element for Shared {
    const STACKABLE: bool = true;

    fn vacant() -> Self {
        Shared(0)
    }
}

// threads race first-use cache creation, resolution and registration
#[test]
fn concurrent_alloc_and_register() {
    let workers: Vec<_> = (0..8u16)
        .map(|worker| {
            thread::spawn(move || {
                for round in 0..100u16 {
                    if round % 10 == 0 {
                        register::<Shared, Composite<Bin2<Shared>, Bin1<Shared>>>();
                    }
                    let count = (worker * 97 + round * 31) % 1500;
                    let len = alloc::<Shared, _, _>(count, |mut buffer| {
                        assert!(buffer.capacity() >= count);
                        if let Some(slot) = buffer.first_mut() {
                            *slot = Shared(u64::from(worker));
                        }
                        assert!(buffer.iter().skip(1).all(|shared| shared.0 == 0));
                        buffer.len()
                    });
                    assert_eq!(len, usize::from(count));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
}
