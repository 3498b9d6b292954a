use github_stars_manager::collector::collect_pages;
use github_stars_manager::error::{Result, StarsManagerError};
use std::cell::RefCell;
use std::collections::VecDeque;

#[tokio::test]
async fn collects_full_pages_until_an_empty_page() {
    // three full pages of 100, then the terminating empty page
    let script: RefCell<VecDeque<Result<Vec<u32>>>> = RefCell::new(
        vec![
            Ok((0..100).collect()),
            Ok((100..200).collect()),
            Ok((200..300).collect()),
            Ok(Vec::new()),
        ]
        .into(),
    );
    let requested_pages = RefCell::new(Vec::new());

    let collected = collect_pages(|page| {
        requested_pages.borrow_mut().push(page);
        let next = script.borrow_mut().pop_front().expect("ran past the script");
        async move { next }
    })
    .await;

    assert!(collected.failure.is_none());
    assert_eq!(collected.items, (0..300).collect::<Vec<_>>());
    assert_eq!(*requested_pages.borrow(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn first_page_failure_yields_empty_items_without_panicking() {
    let collected = collect_pages(|_page| async {
        Err::<Vec<u32>, _>(StarsManagerError::ApiError("server error".to_string()))
    })
    .await;

    assert!(collected.items.is_empty());
    assert!(collected.is_truncated());
    assert!(collected.into_items().is_empty());
}

#[tokio::test]
async fn mid_run_failure_keeps_the_collected_prefix() {
    let script: RefCell<VecDeque<Result<Vec<u32>>>> = RefCell::new(
        vec![
            Ok(vec![1, 2, 3]),
            Err(StarsManagerError::ApiError("server error".to_string())),
        ]
        .into(),
    );

    let collected = collect_pages(|_page| {
        let next = script.borrow_mut().pop_front().expect("ran past the script");
        async move { next }
    })
    .await;

    assert_eq!(collected.items, vec![1, 2, 3]);
    assert!(collected.is_truncated());
}

#[tokio::test]
async fn into_result_reports_truncation_as_an_error() {
    let script: RefCell<VecDeque<Result<Vec<u32>>>> = RefCell::new(
        vec![
            Ok(vec![1, 2]),
            Err(StarsManagerError::ApiError("server error".to_string())),
        ]
        .into(),
    );

    let collected = collect_pages(|_page| {
        let next = script.borrow_mut().pop_front().expect("ran past the script");
        async move { next }
    })
    .await;

    assert!(collected.into_result().is_err());
}

#[tokio::test]
async fn into_result_returns_items_on_a_clean_run() {
    let script: RefCell<VecDeque<Result<Vec<u32>>>> =
        RefCell::new(vec![Ok(vec![1, 2]), Ok(Vec::new())].into());

    let collected = collect_pages(|_page| {
        let next = script.borrow_mut().pop_front().expect("ran past the script");
        async move { next }
    })
    .await;

    assert_eq!(collected.into_result().unwrap(), vec![1, 2]);
}

#[tokio::test]
async fn a_short_page_still_terminates_on_the_following_empty_page() {
    // a partial last page is not a terminal condition by itself
    let script: RefCell<VecDeque<Result<Vec<u32>>>> =
        RefCell::new(vec![Ok(vec![1, 2, 3]), Ok(vec![4]), Ok(Vec::new())].into());
    let requested_pages = RefCell::new(Vec::new());

    let collected = collect_pages(|page| {
        requested_pages.borrow_mut().push(page);
        let next = script.borrow_mut().pop_front().expect("ran past the script");
        async move { next }
    })
    .await;

    assert_eq!(collected.items, vec![1, 2, 3, 4]);
    assert_eq!(*requested_pages.borrow(), vec![1, 2, 3]);
}
