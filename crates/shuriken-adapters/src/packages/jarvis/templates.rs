//! File templates for generated components.
//!
//! Placeholders use the `NAME_*` variants from `RenderContext::for_name`.

pub const COMPONENT_TS: &str = r#"import { forwardRef } from 'react';
import type { {{NAME_PASCAL}}Props } from './{{NAME_KEBAB}}.types';

/**
 * {{NAME_PASCAL}} component.
 *
 * ## Usage
 *
 * import {{NAME_PASCAL}} from '@/components/{{NAME_KEBAB}}';
 *
 * const Example = () => <{{NAME_PASCAL}} />;
 */
const {{NAME_PASCAL}} = forwardRef<HTMLDivElement, {{NAME_PASCAL}}Props>(
  ({ children, color = 'primary', ...props }, forwardedRef) => {
    return (
      <div ref={forwardedRef} data-color={color} {...props}>
        {children}
      </div>
    );
  },
);

export default {{NAME_PASCAL}};
"#;

pub const COMPONENT_JS: &str = r#"import { forwardRef } from 'react';

/**
 * {{NAME_PASCAL}} component.
 *
 * ## Usage
 *
 * import {{NAME_PASCAL}} from '@/components/{{NAME_KEBAB}}';
 *
 * const Example = () => <{{NAME_PASCAL}} />;
 */
const {{NAME_PASCAL}} = forwardRef(({ children, color = 'primary', ...props }, forwardedRef) => {
  return (
    <div ref={forwardedRef} data-color={color} {...props}>
      {children}
    </div>
  );
});

export default {{NAME_PASCAL}};
"#;

pub const INDEX_TS: &str = r#"export { default as {{NAME_PASCAL}} } from './{{NAME_KEBAB}}';
export type { {{NAME_PASCAL}}Props } from './{{NAME_KEBAB}}.types';
"#;

pub const INDEX_JS: &str = r#"export { default as {{NAME_PASCAL}} } from './{{NAME_KEBAB}}';
"#;

pub const TYPES: &str = r#"type {{NAME_PASCAL}}BaseProps = React.HTMLAttributes<HTMLDivElement> & {
  /**
   * Color property.
   */
  color?: string;
};

export type {{NAME_PASCAL}}Props = {{NAME_PASCAL}}BaseProps;
"#;

pub const STORIES: &str = r#"import type { Meta, StoryObj } from '@storybook/react';
import {{NAME_PASCAL}} from './{{NAME_KEBAB}}';

type Story = StoryObj<typeof {{NAME_PASCAL}}>;

const meta: Meta<typeof {{NAME_PASCAL}}> = {
  title: '{{NAME_PASCAL}}/{{NAME_PASCAL}}',
  component: {{NAME_PASCAL}},
};

export const Default: Story = {};

export const WithSecondaryColor: Story = {
  args: {
    color: 'secondary',
  },
};

export default meta;
"#;

pub const TEST: &str = r#"import { render } from '@testing-library/react';
import {{NAME_PASCAL}} from './{{NAME_KEBAB}}';

describe('{{NAME_PASCAL}}', () => {
  it('renders its children', () => {
    const { getByText } = render(<{{NAME_PASCAL}}>hello</{{NAME_PASCAL}}>);
    const {{NAME_CAMEL}} = getByText('hello');

    expect({{NAME_CAMEL}}).toBeTruthy();
  });
});
"#;
