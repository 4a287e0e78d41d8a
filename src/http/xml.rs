//! XML element layout for catalog representations.
//!
//! Elements use PascalCase names (`<ProductID>`, `<Links><Link>`), the layout
//! existing XML clients of the catalog read and write. The price travels as
//! decimal text with its scale preserved.

use quick_xml::{de, se};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductId};
use crate::hateoas::{Link, Resource};
use crate::http::negotiate::CodecError;

pub const PRODUCT_ROOT: &str = "Product";
pub const PRODUCT_LIST_ROOT: &str = "ArrayOfProduct";
pub const RESOURCE_ROOT: &str = "LinkHelperOfProduct";

#[derive(Debug, Serialize, Deserialize)]
struct ProductElement {
    #[serde(rename = "ProductID", default)]
    id: u64,
    #[serde(rename = "ProductCode")]
    code: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Quantity")]
    quantity: i32,
    #[serde(rename = "Price")]
    price: String,
}

impl From<&Product> for ProductElement {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.into(),
            code: product.code.clone(),
            name: product.name.clone(),
            quantity: product.quantity,
            price: product.price.to_string(),
        }
    }
}

impl TryFrom<ProductElement> for Product {
    type Error = CodecError;

    fn try_from(element: ProductElement) -> Result<Self, Self::Error> {
        let text = element.price.trim();
        let price = text
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|e| CodecError::Xml(format!("Price {text:?}: {e}")))?;

        let mut product = Product::new(element.code, element.name, element.quantity, price);
        product.id = ProductId(element.id);
        Ok(product)
    }
}

#[derive(Serialize)]
struct LinkElement<'a> {
    #[serde(rename = "Href")]
    href: &'a str,
    #[serde(rename = "Rel")]
    rel: &'a str,
    method: &'a str,
}

impl<'a> From<&'a Link> for LinkElement<'a> {
    fn from(link: &'a Link) -> Self {
        Self {
            href: &link.href,
            rel: &link.rel,
            method: &link.method,
        }
    }
}

#[derive(Serialize)]
struct LinkList<'a> {
    #[serde(rename = "Link")]
    links: Vec<LinkElement<'a>>,
}

#[derive(Serialize)]
struct ResourceElement<'a> {
    #[serde(rename = "Value")]
    value: ProductElement,
    #[serde(rename = "Links")]
    links: LinkList<'a>,
}

#[derive(Serialize)]
struct ProductList {
    #[serde(rename = "Product")]
    products: Vec<ProductElement>,
}

fn write<T: Serialize>(root: &str, value: &T) -> Result<String, CodecError> {
    se::to_string_with_root(root, value).map_err(|e| CodecError::Xml(e.to_string()))
}

pub fn product_to_xml(product: &Product) -> Result<String, CodecError> {
    write(PRODUCT_ROOT, &ProductElement::from(product))
}

pub fn products_to_xml(products: &[Product]) -> Result<String, CodecError> {
    let list = ProductList {
        products: products.iter().map(ProductElement::from).collect(),
    };
    write(PRODUCT_LIST_ROOT, &list)
}

pub fn resource_to_xml(resource: &Resource<Product>) -> Result<String, CodecError> {
    let element = ResourceElement {
        value: ProductElement::from(&resource.value),
        links: LinkList {
            links: resource.links.iter().map(LinkElement::from).collect(),
        },
    };
    write(RESOURCE_ROOT, &element)
}

/// Read a `<Product>` document. `ProductID` may be left out.
pub fn product_from_xml(text: &str) -> Result<Product, CodecError> {
    let element: ProductElement = de::from_str(text).map_err(|e| CodecError::Xml(e.to_string()))?;
    Product::try_from(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hateoas::{product_resource, LinkResolver};

    fn seed() -> Product {
        let mut product = Product::default_seed();
        product.id = ProductId(1);
        product
    }

    #[test]
    fn test_product_element_names() {
        let xml = product_to_xml(&seed()).unwrap();
        assert_eq!(
            xml,
            "<Product><ProductID>1</ProductID><ProductCode>Product Code 1</ProductCode>\
             <Name>Product Item 1</Name><Quantity>1</Quantity><Price>110.50</Price></Product>"
        );
        assert_eq!(product_from_xml(&xml).unwrap(), seed());
    }

    #[test]
    fn test_resource_layout() {
        let resource = product_resource(seed(), &LinkResolver::new("http://localhost"));
        let xml = resource_to_xml(&resource).unwrap();

        assert!(xml.starts_with("<LinkHelperOfProduct><Value><ProductID>1</ProductID>"));
        assert_eq!(xml.matches("<Links>").count(), 1);
        assert_eq!(xml.matches("<Link>").count(), 3);
        assert!(xml.contains(
            "<Link><Href>http://localhost/api/products/1</Href><Rel>self</Rel><method>GET</method></Link>"
        ));
    }

    #[test]
    fn test_price_text_is_exact() {
        let body = "<Product><ProductCode>X1</ProductCode><Name>Widget</Name>\
                    <Quantity>5</Quantity><Price> 12345678901234567.89 </Price></Product>";
        let product = product_from_xml(body).unwrap();
        assert_eq!(product.id, ProductId(0));
        assert_eq!(product.price, "12345678901234567.89".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_bad_price_rejected() {
        let body = "<Product><ProductCode>X1</ProductCode><Name>Widget</Name>\
                    <Quantity>5</Quantity><Price>cheap</Price></Product>";
        assert!(matches!(product_from_xml(body), Err(CodecError::Xml(_))));
    }
}
