//! Symbol knowledge base.
//!
//! The single authority for "what may be used, and from where": every
//! `std::` / `boost::` symbol referenced anywhere in the checked tree must
//! have exactly one entry here, naming the header that provides it. A new
//! usage fails `system-includes` until its mapping is added to
//! [`SYMBOL_HEADERS`].

use std::collections::{BTreeSet, HashMap};

/// (qualified symbol, header) pairs. Headers are written as they appear
/// between the angle brackets of an `#include`.
pub const SYMBOL_HEADERS: &[(&str, &str)] = &[
    ("std::ranges::range", "ranges"),
    ("std::ranges::forward_range", "ranges"),
    ("std::ranges::bidirectional_range", "ranges"),
    ("std::ranges::random_access_range", "ranges"),
    ("std::ranges::range_reference_t", "ranges"),
    ("std::ranges::range_value_t", "ranges"),
    ("std::ranges::distance", "ranges"),
    ("std::ranges::sort", "algorithm"),
    ("std::ranges::max_element", "ranges"),
    ("std::ranges::begin", "ranges"),
    ("std::ranges::end", "ranges"),
    ("std::ranges::single_view", "ranges"),
    ("std::ranges::common_view", "ranges"),
    ("std::ranges::view_interface", "ranges"),
    ("std::views::empty", "ranges"),
    ("std::views::single", "ranges"),
    ("std::views::transform", "ranges"),
    ("std::views::filter", "ranges"),
    ("std::views::iota", "ranges"),
    ("std::views::cartesian_product", "ranges"),
    ("std::views::take", "ranges"),
    ("std::views::drop", "ranges"),
    ("std::views::drop_while", "ranges"),
    ("std::views::split", "ranges"),
    ("std::views::common", "ranges"),
    ("std::views::reverse", "ranges"),
    ("std::views::concat", "ranges"),
    ("std::views::enumerate", "ranges"),
    ("std::views::all", "ranges"),
    ("std::same_as", "concepts"),
    ("std::floating_point", "concepts"),
    ("std::integral", "concepts"),
    ("std::unsigned_integral", "concepts"),
    ("std::regular", "concepts"),
    ("std::semiregular", "concepts"),
    ("std::is_void_v", "type_traits"),
    ("std::is_same_v", "type_traits"),
    ("std::is_convertible_v", "type_traits"),
    ("std::is_rvalue_reference_v", "type_traits"),
    ("std::remove_reference_t", "type_traits"),
    ("std::invoke_result_t", "type_traits"),
    ("std::decay_t", "type_traits"),
    ("std::numeric_limits", "limits"),
    ("std::begin", "iterator"),
    ("std::end", "iterator"),
    ("std::input_iterator", "iterator"),
    ("std::input_iterator_tag", "iterator"),
    ("std::forward_iterator", "iterator"),
    ("std::forward_iterator_tag", "iterator"),
    ("std::bidirectional_iterator", "iterator"),
    ("std::bidirectional_iterator_tag", "iterator"),
    ("std::sentinel_for", "iterator"),
    ("std::lower_bound", "algorithm"),
    ("std::reverse", "algorithm"),
    ("std::sort", "algorithm"),
    ("std::mt19937_64", "random"),
    ("std::uniform_int_distribution", "random"),
    ("std::uniform_real_distribution", "random"),
    ("std::abs", "cmath"),
    ("std::hypot", "cmath"),
    ("std::size_t", "cstddef"),
    ("std::int8_t", "cstdint"),
    ("std::int16_t", "cstdint"),
    ("std::int32_t", "cstdint"),
    ("std::int64_t", "cstdint"),
    ("std::uint8_t", "cstdint"),
    ("std::uint16_t", "cstdint"),
    ("std::uint32_t", "cstdint"),
    ("std::uint64_t", "cstdint"),
    ("std::ptrdiff_t", "cstdint"),
    ("std::uintmax_t", "cstdint"),
    ("std::float16_t", "stdfloat"),
    ("std::float32_t", "stdfloat"),
    ("std::float64_t", "stdfloat"),
    ("std::string", "string"),
    ("std::to_string", "string"),
    ("std::string_view", "string_view"),
    ("std::isalnum", "cctype"),
    ("std::formatter", "format"),
    ("std::format", "format"),
    ("std::format_to", "format"),
    ("std::format_context", "format"),
    ("std::format_parse_context", "format"),
    ("std::format_error", "format"),
    ("std::optional", "optional"),
    ("std::nullopt", "optional"),
    ("std::nullopt_t", "optional"),
    ("std::reference_wrapper", "functional"),
    ("std::ref", "functional"),
    ("std::function", "functional"),
    ("std::less", "functional"),
    ("std::make_pair", "utility"),
    ("std::pair", "utility"),
    ("std::declval", "utility"),
    ("std::forward", "utility"),
    ("std::move", "utility"),
    ("std::unreachable", "utility"),
    ("std::tuple", "tuple"),
    ("std::tuple_cat", "tuple"),
    ("std::make_tuple", "tuple"),
    ("std::tie", "tuple"),
    ("std::get", "tuple"),
    ("std::apply", "tuple"),
    ("std::variant", "variant"),
    ("std::get_if", "variant"),
    ("std::holds_alternative", "variant"),
    ("std::strong_ordering", "compare"),
    ("std::vector", "vector"),
    ("std::array", "array"),
    ("std::map", "map"),
    ("std::set", "set"),
    ("std::multiset", "set"),
    ("std::runtime_error", "stdexcept"),
    ("std::cout", "iostream"),
    ("std::ofstream", "fstream"),
    ("std::ostream", "ostream"),
    ("std::endl", "ostream"),
    ("std::istringstream", "sstream"),
    ("std::ios::binary", "ios"),

    // boost
    ("boost::container::small_vector", "boost/container/small_vector.hpp"),
    ("boost::container::static_vector", "boost/container/static_vector.hpp"),
    ("boost::container::static_vector_options", "boost/container/static_vector.hpp"),
    ("boost::container::throw_on_overflow", "boost/container/options.hpp"),
    ("boost::container::inplace_alignment", "boost/container/options.hpp"),
    ("boost::filesystem::path", "boost/filesystem.hpp"),
    ("boost::filesystem::temp_directory_path", "boost/filesystem.hpp"),
    ("boost::filesystem::unique_path", "boost/filesystem.hpp"),
    ("boost::iostreams::mapped_file_source", "boost/iostreams/device/mapped_file.hpp"),
    ("boost::iostreams::mapped_file_base::readonly", "boost/iostreams/device/mapped_file.hpp"),
    ("boost::safe_numerics", "boost/safe_numerics/safe_integer.hpp"),
    ("boost::safe_numerics::safe_numerics_error", "boost/safe_numerics/safe_integer.hpp"),
];

/// Immutable symbol → header lookup, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    headers: HashMap<&'static str, &'static str>,
}

impl KnowledgeBase {
    /// Builds the knowledge base from [`SYMBOL_HEADERS`].
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_entries(SYMBOL_HEADERS)
    }

    /// Later duplicates of a symbol are ignored; the builtin table has none.
    #[must_use]
    pub fn from_entries(entries: &[(&'static str, &'static str)]) -> Self {
        let mut headers = HashMap::with_capacity(entries.len());
        for &(symbol, header) in entries {
            headers.entry(symbol).or_insert(header);
        }
        Self { headers }
    }

    /// Header required by `symbol`, or `None` if the symbol is unknown.
    #[must_use]
    pub fn lookup(&self, symbol: &str) -> Option<&'static str> {
        self.headers.get(symbol).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// All entries, sorted by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        let mut entries: Vec<_> = self.headers.iter().map(|(s, h)| (*s, *h)).collect();
        entries.sort_unstable();
        entries.into_iter()
    }

    /// Distinct headers, sorted.
    #[must_use]
    pub fn headers(&self) -> BTreeSet<&'static str> {
        self.headers.values().copied().collect()
    }

    /// Symbols served by `header`, sorted.
    #[must_use]
    pub fn symbols_for(&self, header: &str) -> Vec<&'static str> {
        let mut symbols: Vec<_> = self
            .headers
            .iter()
            .filter(|(_, h)| **h == header)
            .map(|(s, _)| *s)
            .collect();
        symbols.sort_unstable();
        symbols
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}
