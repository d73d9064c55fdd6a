use criterion::{criterion_group, criterion_main, Criterion};

use models::NewPost;
use service::store::{PostFilter, RecordStore};

fn bench_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = rt.block_on(RecordStore::in_memory()).unwrap();

    // pre-populate outside of the benchmark
    rt.block_on(async {
        let admin = store.user_by_email("admin@example.com").await.unwrap().unwrap();
        let tech = store.category_by_slug("technology").await.unwrap().unwrap();
        for i in 0..200 {
            let post = NewPost {
                title: format!("Bench post {i}"),
                slug: None,
                content: format!("body {i} about rust and storage"),
                excerpt: format!("excerpt {i}"),
                cover_image: None,
                category_id: tech.id,
                author_id: admin.id,
                is_published: i % 3 != 0,
                read_time: None,
                tags: vec!["bench".into()],
            };
            store.save_post(post).await.unwrap();
        }
    });

    c.bench_function("published_posts", |b| {
        b.iter(|| rt.block_on(store.published_posts()).unwrap());
    });

    let filter = PostFilter { query: Some("storage".into()), ..Default::default() };
    c.bench_function("search_posts", |b| {
        b.iter(|| rt.block_on(store.search_posts(&filter)).unwrap());
    });

    c.bench_function("dashboard_stats", |b| {
        b.iter(|| rt.block_on(store.dashboard_stats()).unwrap());
    });
}

criterion_group!(benches, bench_store);
criterion_main!(benches);
