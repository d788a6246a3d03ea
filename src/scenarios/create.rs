use serde_json::json;

use crate::brands::{BRANDS_PATH, messages};
use crate::http::HttpMethod;
use crate::testing::Assertion;

use super::{
    BRAND_SLUG, LOREM_SLUG, RANDOM_NAME, RANDOM_SLUG, RequestTemplate, Scenario, Step, Suite,
    get_brand, post_brands, var,
};

const NON_ASCII_NAME: &str = "CaféBrand💥";
const SPECIAL_CHARS_NAME: &str = "New!Brand@2025#";

pub(super) fn suite() -> Suite {
    let too_long_name = "a".repeat(messages::NAME_MAX_CHARS + 1);

    Suite::new("create")
        .scenario(
            Scenario::new("creates a brand from valid data").step(
                Step::new(post_brands(json!({
                    "name": var(RANDOM_NAME),
                    "slug": var(RANDOM_SLUG),
                })))
                .expect(Assertion::status(201))
                .expect(Assertion::body("name").equals(var(RANDOM_NAME)))
                .expect(Assertion::body("slug").equals(var(RANDOM_SLUG)))
                .expect(Assertion::body("id").is_string())
                .capture(BRAND_SLUG, "slug"),
            ),
        )
        .scenario(
            Scenario::new("rejects a slug that is already taken").step(
                Step::new(post_brands(json!({
                    "name": var(RANDOM_NAME),
                    "slug": var(BRAND_SLUG),
                })))
                .expect(Assertion::status(422))
                .expect(Assertion::body("slug").equals(json!([messages::SLUG_TAKEN]))),
            ),
        )
        .scenario(
            Scenario::new("answers 404 for an unknown brand").step(
                Step::new(get_brand("nonexistent-id"))
                    .expect(Assertion::status(404))
                    .expect(Assertion::body("message").equals(messages::NOT_FOUND)),
            ),
        )
        .scenario(
            Scenario::new("answers 405 for PUT on the collection").step(
                Step::new(
                    RequestTemplate::new(HttpMethod::Put, &[BRANDS_PATH])
                        .accept_json()
                        .json(json!({"name": "invalid method", "slug": "invalid-method"})),
                )
                .expect(Assertion::status(405))
                .expect(Assertion::body("message").equals(messages::METHOD_NOT_ALLOWED)),
            ),
        )
        .scenario(
            Scenario::new("rejects an empty payload")
                .step(Step::new(post_brands(json!({}))).expect(Assertion::status(422))),
        )
        .scenario(
            Scenario::new("rejects a numeric name").step(
                Step::new(post_brands(json!({"name": 12345, "slug": "invalid-slug"})))
                    .expect(Assertion::status(422))
                    .expect(Assertion::body("name").equals(json!([messages::NAME_NOT_STRING]))),
            ),
        )
        .scenario(
            Scenario::new("rejects a name over the length limit").step(
                Step::new(post_brands(json!({
                    "name": too_long_name,
                    "slug": var(LOREM_SLUG),
                })))
                .expect(Assertion::status(422))
                .expect(Assertion::body("name").equals(json!([messages::NAME_TOO_LONG]))),
            ),
        )
        .scenario(
            Scenario::new("requires name and slug").step(
                Step::new(post_brands(json!({"name": "", "slug": ""})))
                    .expect(Assertion::status(422))
                    .expect(Assertion::body("name").equals(json!([messages::NAME_REQUIRED])))
                    .expect(Assertion::body("slug").equals(json!([messages::SLUG_REQUIRED]))),
            ),
        )
        .scenario(
            Scenario::new("accepts a non-ASCII name").step(
                Step::new(post_brands(json!({
                    "name": NON_ASCII_NAME,
                    "slug": var(LOREM_SLUG),
                })))
                .expect(Assertion::status(201))
                .expect(Assertion::body("name").equals(NON_ASCII_NAME))
                .expect(Assertion::body("slug").exists()),
            ),
        )
        .scenario(
            Scenario::new("accepts special characters in the name").step(
                Step::new(post_brands(json!({
                    "name": SPECIAL_CHARS_NAME,
                    "slug": var(LOREM_SLUG),
                })))
                .expect(Assertion::status(201))
                .expect(Assertion::body("name").equals(SPECIAL_CHARS_NAME))
                .expect(Assertion::body("slug").exists()),
            ),
        )
        .scenario(
            Scenario::new("rejects the second brand sharing a slug")
                .step(Step::new(post_brands(json!({
                    "name": "Brand One",
                    "slug": var(LOREM_SLUG),
                }))))
                .step(
                    Step::new(post_brands(json!({
                        "name": "Brand Two",
                        "slug": var(LOREM_SLUG),
                    })))
                    .expect(Assertion::status(422))
                    .expect(Assertion::body("slug").exists())
                    .expect(Assertion::body("slug").equals(json!([messages::SLUG_TAKEN]))),
                ),
        )
        .scenario(
            Scenario::new("rejects unknown fields").step(
                Step::new(post_brands(json!({
                    "name": var(RANDOM_NAME),
                    "slug": var(RANDOM_SLUG),
                    "extraField1": "extra1",
                })))
                .expect(Assertion::status(422)),
            ),
        )
}
