//! Request parameter collections fed into the signature base string.

// self
use crate::{
	_prelude::*,
	sign::encode::{self, EncodingError, ParamValue},
};

/// Ordered multimap of request parameters.
///
/// Insertion order is irrelevant to signing; [`Parameters::encoded_sorted`] produces the canonical
/// ordering. [`Parameters::insert`] keeps keys unique, while [`Parameters::append`] allows the
/// repeated keys that query strings and form bodies may carry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters(Vec<(String, ParamValue)>);
impl Parameters {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key` to `value`, dropping any previous entries for `key`.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
		let key = key.into();

		self.0.retain(|(existing, _)| existing != &key);
		self.0.push((key, value.into()));
	}

	/// Adds an entry without touching existing entries for the same key.
	pub fn append(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
		self.0.push((key.into(), value.into()));
	}

	/// Chaining variant of [`Parameters::insert`].
	pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.insert(key, value);

		self
	}

	/// Returns the first value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.0.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	/// Returns `true` when at least one entry exists for `key`.
	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Removes every entry for `key`, returning how many were dropped.
	pub fn remove(&mut self, key: &str) -> usize {
		let before = self.0.len();

		self.0.retain(|(existing, _)| existing != key);

		before - self.0.len()
	}

	/// Iterates over the raw entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}

	/// Number of entries, counting repeated keys.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when the set holds no entries.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Appends every decoded `key=value` pair from the URL's query string.
	pub fn extend_from_query(&mut self, url: &Url) {
		for (key, value) in url.query_pairs() {
			self.append(key.into_owned(), value.into_owned());
		}
	}

	/// Appends every decoded pair of an `application/x-www-form-urlencoded` body.
	pub fn extend_from_form(&mut self, body: &[u8]) {
		for (key, value) in url::form_urlencoded::parse(body) {
			self.append(key.into_owned(), value.into_owned());
		}
	}

	/// Returns `(key, value)` text pairs, failing on the first non-scalar value.
	pub fn to_pairs(&self) -> Result<Vec<(String, String)>, EncodingError> {
		self.0
			.iter()
			.map(|(key, value)| Ok((key.clone(), value.as_text(key)?.into_owned())))
			.collect()
	}

	/// Percent-encodes every entry accepted by `filter` and sorts by encoded key, then
	/// encoded value.
	pub(crate) fn encoded_sorted(
		&self,
		filter: impl Fn(&str) -> bool,
	) -> Result<Vec<(String, String)>, EncodingError> {
		let mut pairs = Vec::with_capacity(self.0.len());

		for (key, value) in self.0.iter().filter(|(key, _)| filter(key.as_str())) {
			let text = value.as_text(key)?;

			pairs.push((encode::percent_encode(key), encode::percent_encode(&text)));
		}

		pairs.sort();

		Ok(pairs)
	}
}
impl<K, V> FromIterator<(K, V)> for Parameters
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut params = Self::default();

		params.extend(iter);

		params
	}
}
impl<K, V> Extend<(K, V)> for Parameters
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn extend<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = (K, V)>,
	{
		for (key, value) in iter {
			self.append(key, value);
		}
	}
}
