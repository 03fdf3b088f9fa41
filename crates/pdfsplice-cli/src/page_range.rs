/// Parse a page range string like "1,3-5" into a sorted list of 0-indexed page numbers.
///
/// Input is 1-indexed (user-facing). Output is 0-indexed, deduplicated.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = parse_page_list(input, page_count)?;
    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

/// Like [`parse_page_range`], but a page listed more than once is an error.
///
/// Used where each listed page is paired with exactly one other page.
pub fn parse_distinct_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = parse_page_list(input, page_count)?;
    pages.sort_unstable();
    if let Some(pair) = pages.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(format!("page {} is listed more than once", pair[0] + 1));
    }
    Ok(pages)
}

/// Expand every part of `input` into 0-indexed pages, in the order given.
fn parse_page_list(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (start, end) = match part.split_once('-') {
            Some((start, end)) => (parse_page(start, page_count)?, parse_page(end, page_count)?),
            None => {
                let page = parse_page(part, page_count)?;
                (page, page)
            }
        };
        if start > end {
            return Err(format!("invalid range '{part}': start is after end"));
        }
        pages.extend(start - 1..end);
    }

    if pages.is_empty() {
        return Err(format!("no pages in range '{input}'"));
    }
    Ok(pages)
}

/// Parse one 1-indexed page number and check it against `page_count`.
fn parse_page(text: &str, page_count: usize) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    if page > page_count {
        return Err(format!(
            "page {page} exceeds document page count ({page_count})"
        ));
    }
    Ok(page)
}
