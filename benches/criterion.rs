use criterion::{criterion_group, criterion_main, Criterion};
use scoped_buffer::alloc;

fn checksum(bytes: &[u8]) -> u64 {
    bytes.iter().map(|&byte| u64::from(byte)).sum()
}

fn scoped_vs_vec(c: &mut Criterion) {
    for count in [8u16, 64, 512, 1500] {
        let mut group = c.benchmark_group(format!("alloc/{count}"));
        group.bench_function("scoped", |b| {
            b.iter(|| {
                alloc::<u8, _, _>(count, |mut buffer| {
                    buffer.as_mut_slice().fill(0x5a);
                    checksum(&buffer)
                })
            });
        });
        group.bench_function("vec", |b| {
            b.iter(|| {
                let mut buffer = vec![0u8; usize::from(count)];
                buffer.fill(0x5a);
                checksum(&buffer)
            });
        });
        group.finish();
    }
}

criterion_group!(benches, scoped_vs_vec);
criterion_main!(benches);
