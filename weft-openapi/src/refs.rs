use serde_json::{Map, Value};

use crate::document::schema_ref;

/// Rewrite every `$ref` in `value` to point into `#/components/schemas/`.
///
/// The walk is depth-first over objects and arrays at any nesting level,
/// not only over schema bodies:
///
/// - a bare name `"Item"` becomes `"#/components/schemas/Item"`;
/// - a schemars-style `"#/$defs/Item"` becomes `"#/components/schemas/Item"`;
/// - any other `#...` pointer is already qualified and left as is.
///
/// A non-string `$ref` is walked like any other nested value.
pub fn qualify_refs(value: &mut Value) {
    walk(value, None);
}

/// With `root` set, a bare `"#"` (schemars' reference to the root schema)
/// resolves to `#/components/schemas/<root>`; otherwise it is kept.
fn walk(value: &mut Value, root: Option<&str>) {
    let mut stack = vec![value];

    while let Some(current) = stack.pop() {
        match current {
            Value::Object(obj) => {
                for (key, v) in obj.iter_mut() {
                    if key == "$ref" {
                        if let Value::String(target) = v {
                            qualify(target, root);
                            continue;
                        }
                    }
                    if v.is_object() || v.is_array() {
                        stack.push(v);
                    }
                }
            }
            Value::Array(arr) => stack.extend(arr.iter_mut()),
            _ => {}
        }
    }
}

fn qualify(target: &mut String, root: Option<&str>) {
    if target.as_str() == "#" {
        if let Some(name) = root {
            *target = schema_ref(name);
        }
    } else if let Some(name) = target.strip_prefix("#/$defs/") {
        *target = schema_ref(name);
    } else if !target.starts_with('#') {
        *target = schema_ref(target);
    }
}

/// Split a schemars root schema into its `properties` map and the `$defs`
/// it depends on, with references already qualified.
///
/// Returns `(properties, definitions)`. A schema without `properties`
/// (e.g. a newtype or enum) yields an empty map. Self-references (`"#"`)
/// point at the component registered as `name`.
pub(crate) fn split_root_schema(
    name: &str,
    mut root: Value,
) -> (Map<String, Value>, Vec<(String, Value)>) {
    let mut definitions = Vec::new();

    if let Some(obj) = root.as_object_mut() {
        obj.remove("$schema");
        // schemars 1.x uses "$defs" (Draft 2020-12)
        if let Some(Value::Object(defs)) = obj.remove("$defs") {
            for (def_name, mut def) in defs {
                walk(&mut def, Some(name));
                definitions.push((def_name, def));
            }
        }
    }

    walk(&mut root, Some(name));

    let properties = match root {
        Value::Object(mut obj) => match obj.remove("properties") {
            Some(Value::Object(props)) => props,
            _ => Map::new(),
        },
        _ => Map::new(),
    };

    (properties, definitions)
}
