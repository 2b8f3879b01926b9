use crate::common::*;

#[doc = "점(.)으로 구분된 경로를 따라 json 값을 찾아주는 함수"]
fn find_value_by_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
        .filter(|found| !found.is_null())
}

#[doc = "json 객체에서 특정 경로의 값을 원하는 타입으로 꺼내주는 함수"]
/// # Arguments
/// * `value` - 탐색 대상 json 객체
/// * `path`  - 점(.)으로 구분된 필드 경로 ex) "search.query_total"
///
/// # Returns
/// * Result<T, anyhow::Error> - 경로가 없거나 타입 변환에 실패하면 에러를 반환한다.
pub fn get_value_by_path<T: DeserializeOwned>(value: &Value, path: &str) -> Result<T, anyhow::Error> {
    let found: &Value = find_value_by_path(value, path)
        .ok_or_else(|| anyhow!("[get_value_by_path] '{}' field is missing", path))?;

    serde_json::from_value(found.clone())
        .map_err(|e| anyhow!("[get_value_by_path] '{}' field has an unexpected type: {:?}", path, e))
}

#[doc = "경로가 존재하지 않는 경우에만 기본값을 돌려주는 함수 (타입이 맞지 않으면 에러)"]
pub fn get_value_by_path_or<T: DeserializeOwned>(
    value: &Value,
    path: &str,
    default: T,
) -> Result<T, anyhow::Error> {
    match find_value_by_path(value, path) {
        Some(_) => get_value_by_path(value, path),
        None => Ok(default),
    }
}

#[doc = "해당 경로가 json 객체 안에 존재하는지 확인해주는 함수"]
pub fn has_path(value: &Value, path: &str) -> bool {
    find_value_by_path(value, path).is_some()
}
