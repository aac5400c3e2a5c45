//! Integration tests for error contexts carried by async tasks.

use diagctx::prelude::*;
use diagctx::registry;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_task_context_survives_worker_migration() {
    let handles: Vec<_> = (0..16)
        .map(|i| {
            tokio::spawn(
                async move {
                    registry::current().object(format!("Mapper.op{i}"));
                    for _ in 0..10 {
                        tokio::task::yield_now().await;
                    }
                    registry::store().activity("mapping results");
                    tokio::time::sleep(Duration::from_millis(1)).await;
                    registry::recall();
                    registry::snapshot().get_object().map(String::from)
                }
                .in_error_context(),
            )
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let object = handle.await.unwrap();
        assert_eq!(object, Some(format!("Mapper.op{i}")));
    }
}

#[tokio::test]
async fn test_task_context_does_not_leak_into_runtime_thread() {
    registry::reset();

    async {
        registry::current().message("inside task");
        tokio::task::yield_now().await;
    }
    .in_error_context()
    .await;

    assert!(!registry::is_registered());
}

#[tokio::test]
async fn test_task_context_seeded_from_existing() {
    let mut ctx = ErrorContext::new();
    ctx.current_mut().resource("OrderMapper.xml");

    let text = async {
        tokio::task::yield_now().await;
        registry::render()
    }
    .with_error_context(ctx)
    .await;

    assert!(text.contains("### The error may exist in OrderMapper.xml"));
}
