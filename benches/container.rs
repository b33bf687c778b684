#![allow(dead_code)]

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use wirebox::{Container, Inject, InstantiateErrorKind, Registry};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("get_instance", |b| {
        struct A;

        let container = Container::new(Registry::new().instance(A));
        b.iter(|| container.get::<A>().unwrap());
    })
    .bench_function("get_factory_while_held", |b| {
        struct A;

        let container = Container::new(Registry::new().provide(|| Ok::<_, InstantiateErrorKind>(A)));
        let held = container.get::<A>().unwrap();
        b.iter(|| container.get::<A>().unwrap());
        drop(held);
    })
    .bench_function("get_factory_rebuild_every_time", |b| {
        struct A;

        let container = Container::new(Registry::new().provide(|| Ok::<_, InstantiateErrorKind>(A)));
        // Nothing keeps the result alive between iterations, every get runs
        // the factory again.
        b.iter(|| container.get::<A>().unwrap());
    })
    .bench_function("get_chain_while_held", |b| {
        struct A(Arc<B>, Arc<C>);
        struct B(i32);
        struct C(Arc<D>);
        struct D(Arc<E>);
        struct E;

        let container = Container::new(
            Registry::new()
                .provide(|| Ok::<_, InstantiateErrorKind>(E))
                .provide(|Inject(e): Inject<E>| Ok::<_, InstantiateErrorKind>(D(e)))
                .provide(|Inject(d): Inject<D>| Ok::<_, InstantiateErrorKind>(C(d)))
                .provide(|| Ok::<_, InstantiateErrorKind>(B(2)))
                .provide(|Inject(b): Inject<B>, Inject(c): Inject<C>| Ok::<_, InstantiateErrorKind>(A(b, c))),
        );
        let held = container.get::<A>().unwrap();
        b.iter(|| container.get::<A>().unwrap());
        drop(held);
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
