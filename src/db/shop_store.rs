use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{AccessLayer, BackendError, Param, Record};
use crate::models::{Good, MostSoldGood, NewGood, NewSale, Sale};

const MOST_SOLD_GOODS_BY_WORKER: &str = "fn_most_sold_goods_by_worker";
const SET_DISCOUNT_DESCRIPTION: &str = "sp_set_discount_description";

const SELECT_GOODS: &str = r#"
    SELECT good_id AS "GOOD_ID", name AS "NAME", price AS "PRICE", quantity AS "QUANTITY",
           producer AS "PRODUCER", dept_id AS "DEPT_ID", description AS "DESCRIPTION"
    FROM goods
"#;

const SELECT_GOOD_BY_ID: &str = r#"
    SELECT good_id AS "GOOD_ID", name AS "NAME", price AS "PRICE", quantity AS "QUANTITY",
           producer AS "PRODUCER", dept_id AS "DEPT_ID", description AS "DESCRIPTION"
    FROM goods
    WHERE good_id = $1
"#;

const INSERT_GOOD: &str = r#"
    INSERT INTO goods (name, price, quantity, producer, dept_id, description)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING good_id
"#;

// SUM over a bigint or numeric column comes back as NUMERIC
const TOTAL_SOLD: &str =
    r#"SELECT COALESCE(SUM(quantity), 0)::bigint AS total FROM sales WHERE good_id = $1"#;

const INSERT_SALE: &str = r#"
    INSERT INTO sales (good_id, check_no, date_sale, quantity)
    VALUES ($1, $2, LOCALTIMESTAMP, $3)
    RETURNING sale_id
"#;

const INSERT_SALE_LOG: &str =
    r#"INSERT INTO sales_logs (sale_id, modify_date) VALUES ($1, LOCALTIMESTAMP)"#;

const SELECT_SALE_COLUMNS: &str = r#"
    SELECT sale_id AS "SALE_ID", good_id AS "GOOD_ID", check_no AS "CHECK_NO",
           date_sale AS "DATE_SALE", quantity AS "QUANTITY"
    FROM sales
"#;

const AVG_PRICE_BY_DEPT: &str = "SELECT avg_price_by_dept($1)";

/// Every backend interaction the request handlers need
#[async_trait]
pub trait ShopStore: Send + Sync {
    async fn list_goods(&self) -> Result<Vec<Good>, BackendError>;

    /// Insert a good and return the identity the backend assigned
    async fn insert_good(&self, good: &NewGood) -> Result<i32, BackendError>;

    async fn get_good(&self, good_id: i32) -> Result<Option<Good>, BackendError>;

    /// Units sold so far for a good; zero when it has no sales
    async fn total_sold(&self, good_id: i32) -> Result<i64, BackendError>;

    async fn insert_sale(&self, sale: &NewSale) -> Result<i32, BackendError>;

    /// Write the audit row for a freshly inserted sale
    async fn log_sale(&self, sale_id: i32) -> Result<(), BackendError>;

    async fn get_sale(&self, sale_id: i32) -> Result<Option<Sale>, BackendError>;

    async fn sales_for_good(&self, good_id: i32) -> Result<Vec<Sale>, BackendError>;

    async fn most_sold_goods_by_worker(&self, worker_name: &str) -> Result<Vec<MostSoldGood>, BackendError>;

    async fn set_discount(&self, good_name: &str, discount_percentage: i32) -> Result<(), BackendError>;

    async fn average_price_by_department(&self, dept_id: i32) -> Result<Option<f64>, BackendError>;
}

/// [`ShopStore`] backed by the shop database
pub struct PgShopStore {
    db: AccessLayer,
}

impl PgShopStore {
    pub fn new(db: AccessLayer) -> Self {
        Self { db }
    }
}

fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, BackendError> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

fn from_records<T: DeserializeOwned>(records: Vec<Record>) -> Result<Vec<T>, BackendError> {
    records.into_iter().map(from_record).collect()
}

/// Sold-units total from its row; a missing row or NULL counts as zero
fn sold_total(record: Option<Record>) -> Result<i64, BackendError> {
    match record.as_ref().and_then(|record| record.get("total")) {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value.as_i64().ok_or_else(|| {
            BackendError::Mapping(serde::de::Error::custom(format!(
                "expected an integer sales total, got {value}"
            )))
        }),
    }
}

fn identity(value: Option<Value>) -> Result<i32, BackendError> {
    value
        .as_ref()
        .and_then(Value::as_i64)
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| {
            BackendError::Mapping(serde::de::Error::custom(format!(
                "expected an integer identity, got {value:?}"
            )))
        })
}

#[async_trait]
impl ShopStore for PgShopStore {
    async fn list_goods(&self) -> Result<Vec<Good>, BackendError> {
        from_records(self.db.fetch_all(SELECT_GOODS, Vec::new()).await?)
    }

    async fn insert_good(&self, good: &NewGood) -> Result<i32, BackendError> {
        let params = vec![
            Param::from(good.name.clone()),
            Param::from(good.price),
            Param::from(good.quantity),
            Param::from(good.producer.clone()),
            Param::from(good.dept_id),
            Param::from(good.description.clone()),
        ];

        identity(self.db.execute_scalar_function(INSERT_GOOD, params).await?)
    }

    async fn get_good(&self, good_id: i32) -> Result<Option<Good>, BackendError> {
        self.db
            .fetch_one(SELECT_GOOD_BY_ID, vec![good_id.into()])
            .await?
            .map(from_record)
            .transpose()
    }

    async fn total_sold(&self, good_id: i32) -> Result<i64, BackendError> {
        sold_total(self.db.fetch_one(TOTAL_SOLD, vec![good_id.into()]).await?)
    }

    async fn insert_sale(&self, sale: &NewSale) -> Result<i32, BackendError> {
        let params = vec![
            Param::from(sale.good_id),
            Param::from(sale.check_no),
            Param::from(sale.quantity),
        ];

        identity(self.db.execute_scalar_function(INSERT_SALE, params).await?)
    }

    async fn log_sale(&self, sale_id: i32) -> Result<(), BackendError> {
        self.db.execute(INSERT_SALE_LOG, vec![sale_id.into()]).await?;
        Ok(())
    }

    async fn get_sale(&self, sale_id: i32) -> Result<Option<Sale>, BackendError> {
        let query = format!("{SELECT_SALE_COLUMNS} WHERE sale_id = $1");

        self.db
            .fetch_one(&query, vec![sale_id.into()])
            .await?
            .map(from_record)
            .transpose()
    }

    async fn sales_for_good(&self, good_id: i32) -> Result<Vec<Sale>, BackendError> {
        let query = format!("{SELECT_SALE_COLUMNS} WHERE good_id = $1");

        from_records(self.db.fetch_all(&query, vec![good_id.into()]).await?)
    }

    async fn most_sold_goods_by_worker(&self, worker_name: &str) -> Result<Vec<MostSoldGood>, BackendError> {
        let records = self
            .db
            .execute_function(MOST_SOLD_GOODS_BY_WORKER, vec![worker_name.into()])
            .await?;

        from_records(records)
    }

    async fn set_discount(&self, good_name: &str, discount_percentage: i32) -> Result<(), BackendError> {
        self.db
            .execute_procedure(
                SET_DISCOUNT_DESCRIPTION,
                vec![good_name.into(), discount_percentage.into()],
            )
            .await
    }

    async fn average_price_by_department(&self, dept_id: i32) -> Result<Option<f64>, BackendError> {
        let value = self
            .db
            .execute_scalar_function(AVG_PRICE_BY_DEPT, vec![dept_id.into()])
            .await?;

        Ok(value.as_ref().and_then(Value::as_f64))
    }
}
