use serde::Serialize;

const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page: u32,
  pub per_page: u32,
}

impl PageRequest {
  pub fn new(page: Option<u32>, per_page: Option<u32>, default_per_page: u32) -> Self {
    Self {
      page: page.unwrap_or(1).max(1),
      per_page: per_page.unwrap_or(default_per_page).clamp(1, MAX_PER_PAGE),
    }
  }

  pub fn offset(&self) -> i64 {
    i64::from(self.page - 1) * i64::from(self.per_page)
  }

  pub fn limit(&self) -> i64 {
    i64::from(self.per_page)
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self::new(None, None, 10)
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub page: u32,
  pub per_page: u32,
  pub total: u64,
  pub total_pages: u32,
}

impl<T> Page<T> {
  pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
    let per_page = u64::from(request.per_page);
    let total_pages = total.div_ceil(per_page) as u32;
    Self {
      items,
      page: request.page,
      per_page: request.per_page,
      total,
      total_pages,
    }
  }

  /// Slices an already filtered and ordered result set.
  pub fn slice(all: Vec<T>, request: PageRequest) -> Self {
    let total = all.len() as u64;
    let items = all
      .into_iter()
      .skip(request.offset() as usize)
      .take(request.per_page as usize)
      .collect();
    Self::new(items, request, total)
  }

  pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
    Page {
      items: self.items.into_iter().map(f).collect(),
      page: self.page,
      per_page: self.per_page,
      total: self.total,
      total_pages: self.total_pages,
    }
  }
}
