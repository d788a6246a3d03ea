use serde_json::json;

use crate::brands::messages;
use crate::testing::Assertion;

use super::{
    BRAND_ID, RANDOM_NAME, RANDOM_SLUG, Scenario, Step, Suite, create_fixture_brand, post_brands,
    put_brand, var,
};

const NONEXISTENT_ID: &str = "01421421321312312";

pub(super) fn suite() -> Suite {
    let fixture_body = json!({
        "name": var(RANDOM_NAME),
        "slug": var(RANDOM_SLUG),
    });

    Suite::new("update")
        .setup(
            create_fixture_brand()
                .expect(Assertion::status(201))
                .expect(Assertion::body("name").exists())
                .expect(Assertion::body("slug").exists())
                .expect(Assertion::body("id").is_string()),
        )
        .scenario(
            Scenario::new("updates a brand with valid data").step(
                Step::new(put_brand(&var(BRAND_ID), fixture_body.clone()))
                    .expect(Assertion::status(200))
                    .expect(Assertion::body("success").exists())
                    .expect(Assertion::body("success").equals(true)),
            ),
        )
        .scenario(
            Scenario::new("reports no success for an unknown brand").step(
                Step::new(put_brand(NONEXISTENT_ID, fixture_body))
                    .expect(Assertion::status(200))
                    .expect(Assertion::body("success").exists())
                    .expect(Assertion::body("success").equals(false)),
            ),
        )
        .scenario(
            Scenario::new("rejects mistyped fields").step(
                Step::new(put_brand(&var(BRAND_ID), json!({"name": 12345, "slug": true})))
                    .expect(Assertion::status(422))
                    .expect(Assertion::body("name").exists())
                    .expect(Assertion::body("name").contains(messages::NAME_NOT_STRING)),
            ),
        )
        .scenario(
            Scenario::new("accepts a partial update").step(
                Step::new(put_brand(&var(BRAND_ID), json!({"name": var(RANDOM_NAME)})))
                    .expect(Assertion::status(200))
                    .expect(Assertion::body("success").exists())
                    .expect(Assertion::body("success").equals(true)),
            ),
        )
        .scenario(
            Scenario::new("rejects null name and slug").step(
                Step::new(put_brand(&var(BRAND_ID), json!({"name": null, "slug": null})))
                    .expect(Assertion::status(422))
                    .expect(Assertion::body("name").contains(messages::NAME_NOT_STRING))
                    .expect(Assertion::body("slug").contains(messages::SLUG_CHARSET))
                    .expect(Assertion::body("slug").contains(messages::SLUG_NOT_STRING)),
            ),
        )
        .scenario(
            Scenario::new("rejects spaces in the slug").step(
                Step::new(put_brand(
                    &var(BRAND_ID),
                    json!({"name": "Brand With Space", "slug": "Slug with space"}),
                ))
                .expect(Assertion::status(422))
                .expect(Assertion::body("slug").contains(messages::SLUG_CHARSET)),
            ),
        )
        .scenario(
            Scenario::new("rejects special characters in a new slug").step(
                Step::new(post_brands(json!({"name": "Brand@#%", "slug": "slug@#%"})))
                    .expect(Assertion::status(422))
                    .expect(Assertion::body("slug").contains(messages::SLUG_CHARSET)),
            ),
        )
}
