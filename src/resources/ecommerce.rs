use super::{merge_missing, with_defaults};
use crate::core::client::MailchimpClient;
use crate::core::errors::MailchimpError;
use crate::core::kernel::Transport;
use crate::core::types::{Dispatched, HttpMethod, Params};
use serde_json::{json, Value};
use tracing::instrument;

/// `id` of an object that is updated by its own id
fn object_id(object: &Params, kind: &str) -> Result<String, MailchimpError> {
    object
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| MailchimpError::InvalidParameters(format!("{} requires an id", kind)))
}

/// Stores, carts, customers, orders, products and promotions
pub struct Ecommerce<'a, T: Transport> {
    client: &'a mut MailchimpClient<T>,
}

impl<'a, T: Transport> Ecommerce<'a, T> {
    pub(crate) fn new(client: &'a mut MailchimpClient<T>) -> Self {
        Self { client }
    }

    // Stores

    pub async fn get_stores(&self, params: Option<&Params>) -> Result<Value, MailchimpError> {
        self.client
            .call(HttpMethod::Get, "/ecommerce/stores", None, params)
            .await
    }

    pub async fn get_store(
        &self,
        store_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}",
                Some(&[("store_id", store_id)]),
                params,
            )
            .await
    }

    /// Create a store. `id` always wins, then `params`, then `store`.
    #[instrument(skip(self, store, params))]
    pub async fn add_store(
        &mut self,
        id: &str,
        store: Params,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let mut params = params.unwrap_or_default();
        params.insert("id".to_string(), json!(id));
        let params = merge_missing(params, store);

        self.client
            .request(HttpMethod::Post, "/ecommerce/stores", None, Some(&params), batch)
            .await
    }

    pub async fn update_store(
        &mut self,
        store_id: &str,
        name: &str,
        currency_code: &str,
        params: Option<Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(
            params,
            [("name", json!(name)), ("currency_code", json!(currency_code))],
        );

        self.client
            .request(
                HttpMethod::Patch,
                "/ecommerce/stores/{store_id}",
                Some(&[("store_id", store_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn delete_store(&self, store_id: &str) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/ecommerce/stores/{store_id}",
                Some(&[("store_id", store_id)]),
                None,
            )
            .await
    }

    // Carts

    pub async fn get_carts(
        &self,
        store_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/carts",
                Some(&[("store_id", store_id)]),
                params,
            )
            .await
    }

    pub async fn get_cart(
        &self,
        store_id: &str,
        cart_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/carts/{cart_id}",
                Some(&[("store_id", store_id), ("cart_id", cart_id)]),
                params,
            )
            .await
    }

    /// Create a cart for `customer`. `cart` carries `currency_code`,
    /// `order_total` and `lines`.
    #[instrument(skip(self, customer, cart), fields(store_id = %store_id))]
    pub async fn add_cart(
        &mut self,
        store_id: &str,
        id: &str,
        customer: Params,
        cart: Params,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(
            None,
            [("id", json!(id)), ("customer", Value::Object(customer))],
        );
        let params = merge_missing(params, cart);

        self.client
            .request(
                HttpMethod::Post,
                "/ecommerce/stores/{store_id}/carts",
                Some(&[("store_id", store_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn update_cart(
        &mut self,
        store_id: &str,
        cart_id: &str,
        params: Option<&Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        self.client
            .request(
                HttpMethod::Patch,
                "/ecommerce/stores/{store_id}/carts/{cart_id}",
                Some(&[("store_id", store_id), ("cart_id", cart_id)]),
                params,
                batch,
            )
            .await
    }

    pub async fn delete_cart(&self, store_id: &str, cart_id: &str) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/ecommerce/stores/{store_id}/carts/{cart_id}",
                Some(&[("store_id", store_id), ("cart_id", cart_id)]),
                None,
            )
            .await
    }

    pub async fn get_cart_lines(
        &self,
        store_id: &str,
        cart_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/carts/{cart_id}/lines",
                Some(&[("store_id", store_id), ("cart_id", cart_id)]),
                params,
            )
            .await
    }

    pub async fn get_cart_line(
        &self,
        store_id: &str,
        cart_id: &str,
        line_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/carts/{cart_id}/lines/{line_id}",
                Some(&[
                    ("store_id", store_id),
                    ("cart_id", cart_id),
                    ("line_id", line_id),
                ]),
                params,
            )
            .await
    }

    /// `product` carries `product_id`, `product_variant_id`, `quantity` and `price`
    pub async fn add_cart_line(
        &mut self,
        store_id: &str,
        cart_id: &str,
        id: &str,
        product: Params,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = merge_missing(with_defaults(None, [("id", json!(id))]), product);

        self.client
            .request(
                HttpMethod::Post,
                "/ecommerce/stores/{store_id}/carts/{cart_id}/lines",
                Some(&[("store_id", store_id), ("cart_id", cart_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn update_cart_line(
        &mut self,
        store_id: &str,
        cart_id: &str,
        line_id: &str,
        params: Option<&Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        self.client
            .request(
                HttpMethod::Patch,
                "/ecommerce/stores/{store_id}/carts/{cart_id}/lines/{line_id}",
                Some(&[
                    ("store_id", store_id),
                    ("cart_id", cart_id),
                    ("line_id", line_id),
                ]),
                params,
                batch,
            )
            .await
    }

    pub async fn delete_cart_line(
        &self,
        store_id: &str,
        cart_id: &str,
        line_id: &str,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/ecommerce/stores/{store_id}/carts/{cart_id}/lines/{line_id}",
                Some(&[
                    ("store_id", store_id),
                    ("cart_id", cart_id),
                    ("line_id", line_id),
                ]),
                None,
            )
            .await
    }

    // Customers

    pub async fn get_customers(
        &self,
        store_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/customers",
                Some(&[("store_id", store_id)]),
                params,
            )
            .await
    }

    pub async fn get_customer(
        &self,
        store_id: &str,
        customer_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/customers/{customer_id}",
                Some(&[("store_id", store_id), ("customer_id", customer_id)]),
                params,
            )
            .await
    }

    pub async fn add_customer(
        &mut self,
        store_id: &str,
        customer: &Params,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        self.client
            .request(
                HttpMethod::Post,
                "/ecommerce/stores/{store_id}/customers",
                Some(&[("store_id", store_id)]),
                Some(customer),
                batch,
            )
            .await
    }

    /// Update a customer addressed by `customer["id"]`
    pub async fn update_customer(
        &mut self,
        store_id: &str,
        customer: &Params,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let customer_id = object_id(customer, "customer")?;

        self.client
            .request(
                HttpMethod::Patch,
                "/ecommerce/stores/{store_id}/customers/{customer_id}",
                Some(&[("store_id", store_id), ("customer_id", customer_id.as_str())]),
                Some(customer),
                batch,
            )
            .await
    }

    pub async fn delete_customer(
        &self,
        store_id: &str,
        customer_id: &str,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/ecommerce/stores/{store_id}/customers/{customer_id}",
                Some(&[("store_id", store_id), ("customer_id", customer_id)]),
                None,
            )
            .await
    }

    // Orders

    pub async fn get_orders(
        &self,
        store_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/orders",
                Some(&[("store_id", store_id)]),
                params,
            )
            .await
    }

    pub async fn get_order(
        &self,
        store_id: &str,
        order_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/orders/{order_id}",
                Some(&[("store_id", store_id), ("order_id", order_id)]),
                params,
            )
            .await
    }

    #[instrument(skip(self, customer, order), fields(store_id = %store_id))]
    pub async fn add_order(
        &mut self,
        store_id: &str,
        id: &str,
        customer: Params,
        order: Params,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = with_defaults(
            None,
            [("id", json!(id)), ("customer", Value::Object(customer))],
        );
        let params = merge_missing(params, order);

        self.client
            .request(
                HttpMethod::Post,
                "/ecommerce/stores/{store_id}/orders",
                Some(&[("store_id", store_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    pub async fn update_order(
        &mut self,
        store_id: &str,
        order_id: &str,
        params: Option<&Params>,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        self.client
            .request(
                HttpMethod::Patch,
                "/ecommerce/stores/{store_id}/orders/{order_id}",
                Some(&[("store_id", store_id), ("order_id", order_id)]),
                params,
                batch,
            )
            .await
    }

    pub async fn delete_order(&self, store_id: &str, order_id: &str) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/ecommerce/stores/{store_id}/orders/{order_id}",
                Some(&[("store_id", store_id), ("order_id", order_id)]),
                None,
            )
            .await
    }

    pub async fn get_order_lines(
        &self,
        store_id: &str,
        order_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/orders/{order_id}/lines",
                Some(&[("store_id", store_id), ("order_id", order_id)]),
                params,
            )
            .await
    }

    pub async fn get_order_line(
        &self,
        store_id: &str,
        order_id: &str,
        line_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/orders/{order_id}/lines/{line_id}",
                Some(&[
                    ("store_id", store_id),
                    ("order_id", order_id),
                    ("line_id", line_id),
                ]),
                params,
            )
            .await
    }

    pub async fn add_order_line(
        &mut self,
        store_id: &str,
        order_id: &str,
        id: &str,
        product: Params,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let params = merge_missing(with_defaults(None, [("id", json!(id))]), product);

        self.client
            .request(
                HttpMethod::Post,
                "/ecommerce/stores/{store_id}/orders/{order_id}/lines",
                Some(&[("store_id", store_id), ("order_id", order_id)]),
                Some(&params),
                batch,
            )
            .await
    }

    // Products

    pub async fn get_products(
        &self,
        store_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/products",
                Some(&[("store_id", store_id)]),
                params,
            )
            .await
    }

    pub async fn get_product(
        &self,
        store_id: &str,
        product_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/products/{product_id}",
                Some(&[("store_id", store_id), ("product_id", product_id)]),
                params,
            )
            .await
    }

    pub async fn add_product(
        &self,
        store_id: &str,
        product_id: &str,
        title: &str,
        url: &str,
        variants: Vec<Value>,
        params: Option<Params>,
    ) -> Result<Value, MailchimpError> {
        let params = with_defaults(
            params,
            [
                ("id", json!(product_id)),
                ("title", json!(title)),
                ("url", json!(url)),
                ("variants", Value::Array(variants)),
            ],
        );

        self.client
            .call(
                HttpMethod::Post,
                "/ecommerce/stores/{store_id}/products",
                Some(&[("store_id", store_id)]),
                Some(&params),
            )
            .await
    }

    pub async fn update_product(
        &self,
        store_id: &str,
        product_id: &str,
        variants: Vec<Value>,
        params: Option<Params>,
    ) -> Result<Value, MailchimpError> {
        let params = with_defaults(params, [("variants", Value::Array(variants))]);

        self.client
            .call(
                HttpMethod::Patch,
                "/ecommerce/stores/{store_id}/products/{product_id}",
                Some(&[("store_id", store_id), ("product_id", product_id)]),
                Some(&params),
            )
            .await
    }

    pub async fn delete_product(
        &self,
        store_id: &str,
        product_id: &str,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/ecommerce/stores/{store_id}/products/{product_id}",
                Some(&[("store_id", store_id), ("product_id", product_id)]),
                None,
            )
            .await
    }

    pub async fn get_product_variants(
        &self,
        store_id: &str,
        product_id: &str,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/products/{product_id}/variants",
                Some(&[("store_id", store_id), ("product_id", product_id)]),
                None,
            )
            .await
    }

    pub async fn get_product_variant(
        &self,
        store_id: &str,
        product_id: &str,
        variant_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/products/{product_id}/variants/{variant_id}",
                Some(&[
                    ("store_id", store_id),
                    ("product_id", product_id),
                    ("variant_id", variant_id),
                ]),
                params,
            )
            .await
    }

    pub async fn add_product_variant(
        &self,
        store_id: &str,
        product_id: &str,
        params: &Params,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Post,
                "/ecommerce/stores/{store_id}/products/{product_id}/variants",
                Some(&[("store_id", store_id), ("product_id", product_id)]),
                Some(params),
            )
            .await
    }

    pub async fn update_product_variant(
        &self,
        store_id: &str,
        product_id: &str,
        variant_id: &str,
        params: &Params,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Patch,
                "/ecommerce/stores/{store_id}/products/{product_id}/variants/{variant_id}",
                Some(&[
                    ("store_id", store_id),
                    ("product_id", product_id),
                    ("variant_id", variant_id),
                ]),
                Some(params),
            )
            .await
    }

    pub async fn delete_product_variant(
        &self,
        store_id: &str,
        product_id: &str,
        variant_id: &str,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/ecommerce/stores/{store_id}/products/{product_id}/variants/{variant_id}",
                Some(&[
                    ("store_id", store_id),
                    ("product_id", product_id),
                    ("variant_id", variant_id),
                ]),
                None,
            )
            .await
    }

    // Promotions

    pub async fn get_promo_rules(
        &self,
        store_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/promo-rules",
                Some(&[("store_id", store_id)]),
                params,
            )
            .await
    }

    pub async fn get_promo_rule(
        &self,
        store_id: &str,
        promo_rule_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/promo-rules/{promo_rule_id}",
                Some(&[("store_id", store_id), ("promo_rule_id", promo_rule_id)]),
                params,
            )
            .await
    }

    pub async fn add_promo_rule(
        &self,
        store_id: &str,
        promo_rule: &Params,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Post,
                "/ecommerce/stores/{store_id}/promo-rules",
                Some(&[("store_id", store_id)]),
                Some(promo_rule),
            )
            .await
    }

    /// Update a promo rule addressed by `promo_rule["id"]`
    pub async fn update_promo_rule(
        &mut self,
        store_id: &str,
        promo_rule: &Params,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let promo_rule_id = object_id(promo_rule, "promo rule")?;

        self.client
            .request(
                HttpMethod::Patch,
                "/ecommerce/stores/{store_id}/promo-rules/{promo_rule_id}",
                Some(&[
                    ("store_id", store_id),
                    ("promo_rule_id", promo_rule_id.as_str()),
                ]),
                Some(promo_rule),
                batch,
            )
            .await
    }

    pub async fn delete_promo_rule(
        &self,
        store_id: &str,
        promo_rule_id: &str,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/ecommerce/stores/{store_id}/promo-rules/{promo_rule_id}",
                Some(&[("store_id", store_id), ("promo_rule_id", promo_rule_id)]),
                None,
            )
            .await
    }

    pub async fn get_promo_codes(
        &self,
        store_id: &str,
        promo_rule_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/promo-rules/{promo_rule_id}/promo-codes",
                Some(&[("store_id", store_id), ("promo_rule_id", promo_rule_id)]),
                params,
            )
            .await
    }

    pub async fn get_promo_code(
        &self,
        store_id: &str,
        promo_rule_id: &str,
        promo_code_id: &str,
        params: Option<&Params>,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Get,
                "/ecommerce/stores/{store_id}/promo-rules/{promo_rule_id}/promo-codes/{promo_code_id}",
                Some(&[
                    ("store_id", store_id),
                    ("promo_rule_id", promo_rule_id),
                    ("promo_code_id", promo_code_id),
                ]),
                params,
            )
            .await
    }

    pub async fn add_promo_code(
        &self,
        store_id: &str,
        promo_rule_id: &str,
        promo_code: &Params,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Post,
                "/ecommerce/stores/{store_id}/promo-rules/{promo_rule_id}/promo-codes",
                Some(&[("store_id", store_id), ("promo_rule_id", promo_rule_id)]),
                Some(promo_code),
            )
            .await
    }

    /// Update a promo code addressed by `promo_code["id"]`
    pub async fn update_promo_code(
        &mut self,
        store_id: &str,
        promo_rule_id: &str,
        promo_code: &Params,
        batch: bool,
    ) -> Result<Dispatched<Value>, MailchimpError> {
        let promo_code_id = object_id(promo_code, "promo code")?;

        self.client
            .request(
                HttpMethod::Patch,
                "/ecommerce/stores/{store_id}/promo-rules/{promo_rule_id}/promo-codes/{promo_code_id}",
                Some(&[
                    ("store_id", store_id),
                    ("promo_rule_id", promo_rule_id),
                    ("promo_code_id", promo_code_id.as_str()),
                ]),
                Some(promo_code),
                batch,
            )
            .await
    }

    pub async fn delete_promo_code(
        &self,
        store_id: &str,
        promo_rule_id: &str,
        promo_code_id: &str,
    ) -> Result<Value, MailchimpError> {
        self.client
            .call(
                HttpMethod::Delete,
                "/ecommerce/stores/{store_id}/promo-rules/{promo_rule_id}/promo-codes/{promo_code_id}",
                Some(&[
                    ("store_id", store_id),
                    ("promo_rule_id", promo_rule_id),
                    ("promo_code_id", promo_code_id),
                ]),
                None,
            )
            .await
    }
}
