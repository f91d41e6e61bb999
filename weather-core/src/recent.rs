/// Number of cities kept by [`RecentCityTracker::new`].
pub const RECENT_CITY_CAPACITY: usize = 5;

/// Most-recent-first list of successfully queried cities.
///
/// Names are compared exactly as entered. Recording a city that is already
/// listed leaves the list untouched; it is not moved back to the front.
#[derive(Debug, Clone)]
pub struct RecentCityTracker {
    cities: Vec<String>,
    capacity: usize,
}

impl Default for RecentCityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentCityTracker {
    pub fn new() -> Self {
        Self::with_capacity(RECENT_CITY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cities: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a city. Returns `true` if the list changed.
    pub fn record(&mut self, city: &str) -> bool {
        if self.capacity == 0 || self.contains(city) {
            return false;
        }

        self.cities.insert(0, city.to_string());
        self.cities.truncate(self.capacity);
        true
    }

    pub fn list(&self) -> &[String] {
        &self.cities
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
