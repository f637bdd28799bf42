use super::pagination::*;

#[test]
fn test_page_request_default() {
    let request = PageRequest::default();
    assert_eq!(request.page, 1);
    assert_eq!(request.per_page, 20);
}

#[test]
fn test_page_request_offset() {
    let request = PageRequest {
        page: 1,
        per_page: 20,
    };
    assert_eq!(request.offset(), 0);

    let request = PageRequest {
        page: 3,
        per_page: 20,
    };
    assert_eq!(request.offset(), 40);
}

#[test]
fn test_page_zero_is_treated_as_first_page() {
    let request = PageRequest {
        page: 0,
        per_page: 10,
    };
    assert_eq!(request.page(), 1);
    assert_eq!(request.offset(), 0);
}

#[test]
fn test_per_page_is_clamped() {
    let request = PageRequest {
        page: 1,
        per_page: 5000,
    };
    assert_eq!(request.limit(), u64::from(MAX_PER_PAGE));

    let request = PageRequest {
        page: 1,
        per_page: 0,
    };
    assert_eq!(request.limit(), 1);
}

#[test]
fn test_page_response_total_pages() {
    let request = PageRequest {
        page: 1,
        per_page: 20,
    };
    let response = PageResponse::new(vec![1, 2, 3], &request, 41);
    assert_eq!(response.meta.total_pages, 3);

    let empty: PageResponse<i32> = PageResponse::new(vec![], &request, 0);
    assert_eq!(empty.meta.total_pages, 1);
}

#[test]
fn test_page_response_map_keeps_meta() {
    let request = PageRequest::default();
    let response = PageResponse::new(vec![1, 2], &request, 2).map(|n| n * 10);
    assert_eq!(response.data, vec![10, 20]);
    assert_eq!(response.meta.total, 2);
}
